/// Domain-level error shared by the draft, validation, and wizard layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl CoreError {
    /// The human-readable reason without the variant prefix.
    ///
    /// Used when surfacing the error as a notice, where the prefix would be
    /// noise for the author.
    pub fn reason(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) => msg,
        }
    }
}
