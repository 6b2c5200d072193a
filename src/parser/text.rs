use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A UTF-8 no-break space that went through a Latin-1 decode on the way.
const MOJIBAKE_NBSP: &str = "\u{c2}\u{a0}";

/// Clean a text node for the data model: stray no-break spaces and tabs become
/// plain spaces, whitespace runs collapse to one space, ends are trimmed.
pub fn normalize(text: &str) -> String {
    let text = text.replace(MOJIBAKE_NBSP, " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Normalized concatenation of all text below `element`.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize(&element.text().collect::<String>())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_collapses() {
        assert_eq!(normalize("  Mül \n\n  Ber\t\tKi "), "Mül Ber Ki");
    }

    #[test]
    fn stray_no_break_spaces() {
        assert_eq!(normalize("Raum\u{a0}\u{a0}101"), "Raum 101");
        assert_eq!(normalize("Â\u{a0}Entfall"), "Entfall");
        assert_eq!(normalize("a\u{202f}b\u{2007}c"), "a b c");
    }

    #[test]
    fn keeps_legit_circumflex() {
        assert_eq!(normalize("Â b"), "Â b");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n\u{a0}"), "");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "  x  ",
            "ÂÂ\u{a0}x",
            "Â\tx",
            "\u{a0}Â\u{a0}\u{a0}y\n",
            "Klasse 5a\t\t(Gruppe)\r\n",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
            assert_eq!(once.trim(), once);
        }
    }

    #[test]
    fn element_text_joins_nodes() {
        let html = scraper::Html::parse_fragment("<table><tr><td> 3. <b>Std</b>\n</td></tr></table>");
        let sel = scraper::Selector::parse("td").unwrap();
        let td = html.select(&sel).next().unwrap();
        assert_eq!(element_text(td), "3. Std");
    }
}
