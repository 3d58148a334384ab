#![allow(dead_code)]

use keepdrop::{BranchKey, RuleList};
use proptest::prelude::*;

// --- Fixed branch vocabulary ---
// Small alphabets so generated patterns and branches collide often.

pub const CLASSES: &[&str] = &["recoMuons", "recoTracks", "recoPFCandidates"];
pub const MODULES: &[&str] = &["muons", "generalTracks", "particleFlow"];
pub const INSTANCES: &[&str] = &["", "muons", "cosmicVariant"];
pub const PROCESSES: &[&str] = &["", "HLT", "RECO"];

const VOCABULARY: [&[&str]; 4] = [CLASSES, MODULES, INSTANCES, PROCESSES];

/// Generate a branch drawn from the fixed vocabulary.
pub fn arb_branch() -> impl Strategy<Value = BranchKey> {
    (
        prop::sample::select(CLASSES),
        prop::sample::select(MODULES),
        prop::sample::select(INSTANCES),
        prop::sample::select(PROCESSES),
    )
        .prop_map(|(class, module, instance, process)| {
            BranchKey::new(class, module, instance, process)
        })
}

pub fn arb_branches() -> impl Strategy<Value = Vec<BranchKey>> {
    prop::collection::vec(arb_branch(), 0..24)
}

/// A generated rule: action and pattern text, before parsing.
#[derive(Debug, Clone)]
pub struct GenRule {
    pub keep: bool,
    pub fields: Vec<String>,
}

impl GenRule {
    pub fn pattern(&self) -> String {
        self.fields.join("_")
    }

    pub fn line(&self) -> String {
        let action = if self.keep { "keep" } else { "drop" };
        format!("{action} {}", self.pattern())
    }

    /// Independent reference matcher working on the raw field strings.
    pub fn matches(&self, key: &BranchKey) -> bool {
        let pattern = self.pattern();
        if pattern == "*" {
            return true;
        }
        let values = key.fields();
        pattern
            .split('_')
            .enumerate()
            .all(|(i, field)| field == "*" || field == values[i])
    }
}

fn arb_field(slot: usize) -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just("*".to_owned()),
        2 => prop::sample::select(VOCABULARY[slot]).prop_map(str::to_owned),
    ]
}

/// Generate one rule with 1 to 4 fields (the class field is never an empty literal).
pub fn arb_rule() -> impl Strategy<Value = GenRule> {
    (
        any::<bool>(),
        1_usize..=4,
        arb_field(0),
        arb_field(1),
        arb_field(2),
        arb_field(3),
    )
        .prop_map(|(keep, width, a, b, c, d)| {
            let mut fields = vec![a, b, c, d];
            fields.truncate(width);
            GenRule { keep, fields }
        })
}

pub fn arb_rules() -> impl Strategy<Value = Vec<GenRule>> {
    prop::collection::vec(arb_rule(), 0..12)
}

pub fn compile(rules: &[GenRule]) -> RuleList {
    RuleList::parse(rules.iter().map(GenRule::line)).expect("generated rules are well formed")
}

/// Reference decision: the last matching rule, found by scanning backwards.
pub fn model_should_keep(rules: &[GenRule], key: &BranchKey) -> bool {
    rules
        .iter()
        .rev()
        .find(|rule| rule.matches(key))
        .is_some_and(|rule| rule.keep)
}

/// Index of the last matching rule, if any.
pub fn model_deciding_rule(rules: &[GenRule], key: &BranchKey) -> Option<usize> {
    rules.iter().rposition(|rule| rule.matches(key))
}
