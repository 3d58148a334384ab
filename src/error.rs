use thiserror::Error;

use crate::parse::ParseError;
use crate::{BranchKeyError, ContentError, MalformedRuleError};

/// Unified error type covering parsing, rule validation, content resolution,
/// and I/O.
///
/// Returned by convenience loaders like
/// [`ContentConfig::from_text()`](crate::ContentConfig::from_text) and
/// [`ContentConfig::from_file()`](crate::ContentConfig::from_file).
#[derive(Debug, Error)]
pub enum KeepDropError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Rule(#[from] MalformedRuleError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    BranchKey(#[from] BranchKeyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "binary-cache")]
    #[error(transparent)]
    Serialize(#[from] crate::serial::SerializeError),

    #[cfg(feature = "binary-cache")]
    #[error(transparent)]
    Deserialize(#[from] crate::serial::DeserializeError),
}
