mod branch_key;
mod content;
mod decision;
mod error;
mod pattern;
mod rule;
mod rule_list;
mod selection;
mod selection_report;
mod selector;

pub use branch_key::BranchKey;
pub use content::{ContentBlock, ContentConfig, Direction};
pub use decision::Decision;
pub use error::{BranchKeyError, ContentError, MalformedRuleError, MalformedRuleKind};
pub use pattern::{Field, Pattern};
pub use rule::{Action, Rule};
pub use rule_list::{RuleList, RuleListBuilder};
pub use selection::Selection;
pub use selection_report::SelectionReport;
pub use selector::BranchSelector;
