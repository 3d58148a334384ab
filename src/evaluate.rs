use std::time::Instant;

use crate::types::{Action, BranchKey, Decision, Rule, SelectionReport};

/// Last matching rule wins; with no match the branch is dropped.
///
/// Every rule is visited. Rules must be in source order.
pub(crate) fn evaluate(rules: &[Rule], key: &BranchKey) -> bool {
    let mut decision = false;
    for rule in rules {
        if rule.pattern.matches(key) {
            decision = rule.action == Action::Keep;
        }
    }
    decision
}

pub(crate) fn decide(rules: &[Rule], key: &BranchKey) -> Decision {
    let mut decision = Decision::default_drop();
    for rule in rules {
        if rule.pattern.matches(key) {
            decision = Decision::by_rule(rule.action == Action::Keep, rule.source_index);
        }
    }
    decision
}

pub(crate) fn evaluate_detailed(rules: &[Rule], key: &BranchKey) -> SelectionReport {
    let start = Instant::now();

    let mut matched = Vec::new();
    let mut decision = Decision::default_drop();
    for rule in rules {
        if rule.pattern.matches(key) {
            matched.push(rule.source_index);
            decision = Decision::by_rule(rule.action == Action::Keep, rule.source_index);
        }
    }

    let duration = start.elapsed();
    SelectionReport::new(key.clone(), decision, matched, duration)
}
