/// Failures of the extraction engine.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A structurally required table or heading is absent.
    #[error("element not found: {0}")]
    ElementNotFound(&'static str),
    /// Text was located but does not have the expected shape.
    #[error("unexpected format of {what}: {detail}")]
    Format { what: &'static str, detail: String },
    /// The markup could not be processed at all.
    #[error("document could not be parsed: {0}")]
    Document(String),
}

impl ParseError {
    pub fn format(what: &'static str, detail: impl Into<String>) -> Self {
        ParseError::Format {
            what,
            detail: detail.into(),
        }
    }
}
