use tracing::{debug, warn};

use crate::error::ParseError;
use crate::model::Plan;
use crate::parser::extract::assemble;
use crate::parser::segment::split_days;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parse a DSB/Untis bulletin holding any number of days.
///
/// All or nothing: the first fragment that fails discards every plan.
pub fn parse(markup: &str) -> Result<Vec<Plan>, ParseError> {
    let fragments = split_days(markup)?;
    if fragments.is_empty() {
        debug!("no day markers in bulletin");
        return Ok(Vec::new());
    }
    assemble_all(&fragments)
}

#[cfg(feature = "rayon")]
fn assemble_all(fragments: &[String]) -> Result<Vec<Plan>, ParseError> {
    fragments
        .par_iter()
        .enumerate()
        .map(|(index, fragment)| assemble_logged(index, fragment))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn assemble_all(fragments: &[String]) -> Result<Vec<Plan>, ParseError> {
    fragments
        .iter()
        .enumerate()
        .map(|(index, fragment)| assemble_logged(index, fragment))
        .collect()
}

fn assemble_logged(index: usize, fragment: &str) -> Result<Plan, ParseError> {
    assemble(fragment).inspect_err(|e| warn!(fragment = index, error = %e, "day fragment rejected"))
}

// ── Tests ──
