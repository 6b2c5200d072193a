use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;
use crate::model::Substitution;
use crate::parser::text::element_text;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table.k").unwrap());
static GROUP: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody.k").unwrap());
static HEADER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th.k").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr.k").unwrap());

/// Rows sharing one row-spanning class header.
#[derive(Debug)]
struct RowGroup<'a> {
    class: String,
    rows: Vec<ElementRef<'a>>,
}

/// Read the substitution table. The table is mandatory.
pub fn extract(document: &Html) -> Result<Vec<Substitution>, ParseError> {
    let table = document
        .select(&TABLE)
        .next()
        .ok_or(ParseError::ElementNotFound("substitution table (table.k)"))?;

    let substitutions = row_groups(table)
        .into_iter()
        .flat_map(|group| {
            let RowGroup { class, rows } = group;
            rows.into_iter().map(move |row| bind_row(&class, row))
        })
        .collect();
    Ok(substitutions)
}

/// Split the table into class groups, in document order.
///
/// Untis wraps every group in its own `tbody.k`. Tables without those wrappers
/// are folded row by row instead: a row carrying `th.k` opens the next group.
fn row_groups(table: ElementRef<'_>) -> Vec<RowGroup<'_>> {
    let bodies: Vec<ElementRef<'_>> = table.select(&GROUP).collect();
    if !bodies.is_empty() {
        return bodies
            .into_iter()
            .map(|body| RowGroup {
                class: body.select(&HEADER).next().map(element_text).unwrap_or_default(),
                rows: body.select(&ROW).filter(|row| is_data_row(*row)).collect(),
            })
            .collect();
    }

    let mut groups: Vec<RowGroup<'_>> = Vec::new();
    for row in table.select(&ROW) {
        if let Some(header) = row.select(&HEADER).next() {
            groups.push(RowGroup {
                class: element_text(header),
                rows: Vec::new(),
            });
        }
        if !is_data_row(row) {
            continue;
        }
        match groups.last_mut() {
            Some(group) => group.rows.push(row),
            None => groups.push(RowGroup {
                class: String::new(),
                rows: vec![row],
            }),
        }
    }
    groups
}

fn data_cells(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
}

fn is_data_row(row: ElementRef<'_>) -> bool {
    data_cells(row).next().is_some()
}

/// Cells bind by position; header labels are not reliable. Cancelled lessons
/// usually omit the trailing cells, which then stay empty.
fn bind_row(class: &str, row: ElementRef<'_>) -> Substitution {
    let mut substitution = Substitution {
        class: class.to_string(),
        ..Default::default()
    };
    for (index, cell) in data_cells(row).enumerate() {
        let slot = match index {
            0 => &mut substitution.teacher,
            1 => &mut substitution.period,
            2 => &mut substitution.substitute,
            3 => &mut substitution.room,
            4 => &mut substitution.info,
            _ => break,
        };
        *slot = element_text(cell);
    }
    substitution
}

// ── Tests ──
