use std::fmt;

use super::branch_key::BranchKey;
use super::error::MalformedRuleError;
use super::pattern::Pattern;

/// The leading keyword of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Keep,
    Drop,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Keep => "keep",
            Action::Drop => "drop",
        }
    }

    /// Parse the exact, case-sensitive keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "keep" => Some(Action::Keep),
            "drop" => Some(Action::Drop),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed `keep`/`drop` command with its fixed position in a
/// [`RuleList`](super::RuleList).
///
/// The original line is retained so diagnostics can quote it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) action: Action,
    pub(crate) pattern: Pattern,
    pub(crate) source_index: usize,
    pub(crate) line: String,
}

impl Rule {
    /// Parse a single command line such as `keep recoTracks_generalTracks_*_*`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRuleError`] carrying `line` and `source_index` if the
    /// command is not a valid rule.
    pub fn parse(line: &str, source_index: usize) -> Result<Self, MalformedRuleError> {
        crate::compile::compile_rule(line, source_index)
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// The command exactly as it was written.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    #[must_use]
    pub fn matches(&self, key: &BranchKey) -> bool {
        self.pattern.matches(key)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_keywords_are_case_sensitive() {
        assert_eq!(Action::from_keyword("keep"), Some(Action::Keep));
        assert_eq!(Action::from_keyword("drop"), Some(Action::Drop));
        assert_eq!(Action::from_keyword("Keep"), None);
        assert_eq!(Action::from_keyword("DROP"), None);
    }

    #[test]
    fn display_normalizes_spacing() {
        let rule = Rule::parse("keep  *_offlinePrimaryVertices__*", 2).unwrap();
        assert_eq!(rule.to_string(), "keep *_offlinePrimaryVertices__*");
        assert_eq!(rule.line(), "keep  *_offlinePrimaryVertices__*");
        assert_eq!(rule.source_index(), 2);
    }
}
