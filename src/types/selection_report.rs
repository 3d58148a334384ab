use std::fmt;
use std::time::Duration;

use super::branch_key::BranchKey;
use super::decision::Decision;

/// Detailed evaluation report returned by
/// [`RuleList::evaluate_detailed()`](super::RuleList::evaluate_detailed).
///
/// Contains the decision, every rule that matched the branch in source order,
/// and the wall-clock duration of the evaluation.
#[derive(Debug, Clone)]
#[must_use]
pub struct SelectionReport {
    branch: BranchKey,
    decision: Decision,
    matched: Vec<usize>,
    duration: Duration,
}

impl SelectionReport {
    pub(crate) fn new(
        branch: BranchKey,
        decision: Decision,
        matched: Vec<usize>,
        duration: Duration,
    ) -> Self {
        Self {
            branch,
            decision,
            matched,
            duration,
        }
    }

    #[must_use]
    pub fn branch(&self) -> &BranchKey {
        &self.branch
    }

    /// Same answer as [`RuleList::decide()`](super::RuleList::decide).
    pub fn decision(&self) -> Decision {
        self.decision
    }

    #[must_use]
    pub fn kept(&self) -> bool {
        self.decision.kept()
    }

    /// Source indices of all rules that matched, in evaluation order.
    #[must_use]
    pub fn matched(&self) -> &[usize] {
        &self.matched
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.branch, self.decision)?;
        let matched: Vec<String> = self.matched.iter().map(ToString::to_string).collect();
        write!(f, ", matched: [{}]", matched.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch() -> BranchKey {
        BranchKey::new("recoMuons", "muons", "", "RECO")
    }

    #[test]
    fn report_accessors() {
        let report = SelectionReport::new(
            branch(),
            Decision::by_rule(true, 1),
            vec![0, 1],
            Duration::from_nanos(500),
        );

        assert_eq!(report.branch(), &branch());
        assert!(report.kept());
        assert_eq!(report.decision().rule_index(), Some(1));
        assert_eq!(report.matched(), &[0, 1]);
        assert_eq!(report.duration(), Duration::from_nanos(500));
    }

    #[test]
    fn report_display() {
        let report = SelectionReport::new(
            branch(),
            Decision::by_rule(true, 1),
            vec![0, 1],
            Duration::from_nanos(500),
        );
        let s = report.to_string();
        assert!(s.contains("recoMuons_muons__RECO: kept by rule 1"));
        assert!(s.contains("matched: [0, 1]"));
    }

    #[test]
    fn report_display_default() {
        let report = SelectionReport::new(
            branch(),
            Decision::default_drop(),
            vec![],
            Duration::from_nanos(100),
        );
        assert!(report.to_string().contains("dropped by default"));
    }
}
