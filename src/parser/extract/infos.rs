use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::text::element_text;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table.F").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th.F").unwrap());

/// Free-text notes of the day. Most days have no info table.
pub fn extract(document: &Html) -> Vec<String> {
    let Some(table) = document.select(&TABLE).next() else {
        return Vec::new();
    };

    table
        .select(&CELL)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_table() {
        assert!(extract(&Html::parse_document("<h2>x</h2>")).is_empty());
    }

    #[test]
    fn skips_blank_cells() {
        let html = Html::parse_document(
            "<table class=\"F\">
               <tr><th class=\"F\">\n\t</th></tr>
               <tr><th class=\"F\">Â\u{a0}Die 5. Stunde\tentfällt  für alle.</th></tr>
               <tr><th class=\"F\">\u{a0}</th></tr>
               <tr><th class=\"F\">Wandertag 7a</th></tr>
             </table>",
        );
        assert_eq!(extract(&html), ["Die 5. Stunde entfällt für alle.", "Wandertag 7a"]);
    }
}
