use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::ParseError;
use crate::model::Absence;
use crate::parser::text::element_text;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table.K").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr.K").unwrap());
static CLASS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th.K").unwrap());
static PERIODS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Read the absent classes; the table itself is required, rows are not.
pub fn extract(document: &Html) -> Result<Vec<Absence>, ParseError> {
    let table = document
        .select(&TABLE)
        .next()
        .ok_or(ParseError::ElementNotFound("absence table (table.K)"))?;

    let absences = table
        .select(&ROW)
        .map(|row| Absence {
            class: row.select(&CLASS).next().map(element_text).unwrap_or_default(),
            periods: row.select(&PERIODS).next().map(element_text).unwrap_or_default(),
        })
        .collect();
    Ok(absences)
}

// ── Tests ──
