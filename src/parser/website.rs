use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::model::{Plan, Substitution};
use crate::parser::text::element_text;

static DAY_HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

/// Parse the plan page of the school website: one `h3` per day, each
/// followed by a flat table whose first row holds the column labels.
///
/// Days without a table simply have no substitutions.
pub fn parse(markup: &str) -> Vec<Plan> {
    let document = Html::parse_document(markup);

    document
        .select(&DAY_HEADING)
        .map(|heading| {
            let title = element_text(heading);
            let date = title.split_whitespace().last().unwrap_or_default().to_string();
            let substitutions: Vec<Substitution> = day_table(heading)
                .map(|table| table.select(&ROW).skip(1).map(bind_row).collect())
                .unwrap_or_default();

            debug!(%date, substitutions = substitutions.len(), "website day");
            Plan {
                title,
                date,
                created_at: None,
                absences: Vec::new(),
                infos: Vec::new(),
                substitutions,
            }
        })
        .collect()
}

/// First table after `heading`, before the next day heading.
fn day_table(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        match sibling.value().name() {
            "h3" => return None,
            "table" => return Some(sibling),
            _ => {
                if let Some(table) = sibling.select(&TABLE).next() {
                    return Some(table);
                }
            }
        }
    }
    None
}

fn bind_row(row: ElementRef<'_>) -> Substitution {
    let mut substitution = Substitution::default();
    let cells = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td");
    for (index, cell) in cells.enumerate() {
        let slot = match index {
            0 => &mut substitution.class,
            1 => &mut substitution.teacher,
            2 => &mut substitution.period,
            3 => &mut substitution.substitute,
            4 => &mut substitution.room,
            5 => &mut substitution.info,
            _ => break,
        };
        *slot = element_text(cell);
    }
    substitution
}

// ── Tests ──
