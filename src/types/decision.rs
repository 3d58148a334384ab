use std::fmt;

/// The outcome of evaluating one branch against a [`RuleList`](super::RuleList).
///
/// `rule_index` is the source index of the last matching rule, or `None` when
/// no rule matched and the implicit default (drop) applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Decision {
    kept: bool,
    rule_index: Option<usize>,
}

impl Decision {
    pub(crate) fn default_drop() -> Self {
        Self {
            kept: false,
            rule_index: None,
        }
    }

    pub(crate) fn by_rule(kept: bool, rule_index: usize) -> Self {
        Self {
            kept,
            rule_index: Some(rule_index),
        }
    }

    #[must_use]
    pub fn kept(&self) -> bool {
        self.kept
    }

    #[must_use]
    pub fn rule_index(&self) -> Option<usize> {
        self.rule_index
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.kept { "kept" } else { "dropped" };
        match self.rule_index {
            Some(idx) => write!(f, "{verb} by rule {idx}"),
            None => write!(f, "{verb} by default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dropped_without_rule() {
        let d = Decision::default_drop();
        assert!(!d.kept());
        assert_eq!(d.rule_index(), None);
        assert_eq!(d.to_string(), "dropped by default");
    }

    #[test]
    fn by_rule_display() {
        assert_eq!(Decision::by_rule(true, 4).to_string(), "kept by rule 4");
        assert_eq!(Decision::by_rule(false, 0).to_string(), "dropped by rule 0");
    }
}
