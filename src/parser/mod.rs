pub mod dsb;
pub mod extract;
pub mod segment;
pub mod text;
pub mod website;

use clap::ValueEnum;

use crate::error::ParseError;
use crate::model::Plan;

/// Bulletin layouts the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ParserKind {
    /// Untis export delivered through DSB, days delimited by named anchors.
    #[default]
    #[value(alias = "effner")]
    Dsb,
    /// Plan page of the school website, one `h3` per day.
    #[value(alias = "effner-de")]
    Website,
}

impl ParserKind {
    pub fn parse(self, markup: &str) -> Result<Vec<Plan>, ParseError> {
        match self {
            ParserKind::Dsb => dsb::parse(markup),
            ParserKind::Website => Ok(website::parse(markup)),
        }
    }
}
