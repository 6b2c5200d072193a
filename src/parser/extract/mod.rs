pub mod absences;
pub mod header;
pub mod infos;
pub mod substitutions;

use scraper::Html;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::model::Plan;

/// Build the plan of one day fragment.
///
/// Missing substitution or absence tables fail the fragment. A missing info
/// table means no infos, and an unreadable creation note leaves `created_at`
/// empty.
pub fn assemble(fragment: &str) -> Result<Plan, ParseError> {
    let document = Html::parse_document(fragment);

    let date = header::find_date(&document);
    let title = header::find_title(&document);
    let created_at = match header::find_created_at(&document) {
        Ok(created_at) => Some(created_at),
        Err(e) => {
            warn!(%date, error = %e, "creation timestamp unreadable");
            None
        }
    };

    let absences = absences::extract(&document)?;
    let infos = infos::extract(&document);
    let substitutions = substitutions::extract(&document)?;

    debug!(
        %date,
        %title,
        absences = absences.len(),
        infos = infos.len(),
        substitutions = substitutions.len(),
        "assembled plan"
    );

    Ok(Plan {
        title,
        date,
        created_at,
        absences,
        infos,
        substitutions,
    })
}

// ── Tests ──
