//! Ordered keep/drop selection of event data products.
//!
//! A [`RuleList`] is parsed from `outputCommands` / `inputCommands` lines such
//! as `drop *` or `keep recoTracks_generalTracks_*_*`. Each branch is decided
//! by the last rule whose pattern matches it; a branch no rule matches is
//! dropped.

mod compile;
mod error;
mod evaluate;
pub mod parse;
mod resolve;
#[cfg(feature = "binary-cache")]
pub mod serial;
mod types;

pub use error::KeepDropError;
#[cfg(feature = "binary-cache")]
pub use serial::{DeserializeError, SerializeError};
pub use types::{
    Action, BranchKey, BranchKeyError, BranchSelector, ContentBlock, ContentConfig, ContentError,
    Decision, Direction, Field, MalformedRuleError, MalformedRuleKind, Pattern, Rule, RuleList,
    RuleListBuilder, Selection, SelectionReport,
};
