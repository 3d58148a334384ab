use thiserror::Error;

/// Syntax error in content configuration text.
///
/// The message is winnow's rendering of the failure, which quotes the
/// offending input and points at the failing position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("content syntax error: {message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
