use thiserror::Error;

/// Why a command line could not be turned into a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRuleKind {
    #[error("empty command")]
    Empty,

    #[error("unknown action '{action}', expected 'keep' or 'drop'")]
    UnknownAction { action: String },

    #[error("missing pattern after '{action}'")]
    MissingPattern { action: String },

    #[error("expected a single pattern, found {count} tokens")]
    MultiplePatterns { count: usize },

    #[error("pattern has {count} fields, at most 4 are allowed")]
    TooManyFields { count: usize },

    #[error("wildcards inside a field are not supported: '{field}'")]
    UnsupportedGlob { field: String },
}

/// A rule that failed to parse, with the offending line and its position.
///
/// Raised only while building a [`RuleList`](super::RuleList), never while
/// evaluating one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed rule at index {index} ('{line}'): {kind}")]
pub struct MalformedRuleError {
    pub index: usize,
    pub line: String,
    pub kind: MalformedRuleKind,
}

/// A canonical branch name that does not have the four required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BranchKeyError {
    #[error("branch name '{name}' has {found} fields, expected 4")]
    FieldCount { name: String, found: usize },
}

/// Errors produced while resolving content configuration statements.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content block '{block}' is used before it is defined")]
    UndefinedBlock { block: String },

    #[error("in content block '{block}': {source}")]
    Rule {
        block: String,
        #[source]
        source: MalformedRuleError,
    },
}
