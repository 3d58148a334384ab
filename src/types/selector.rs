use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::branch_key::BranchKey;
use super::rule_list::RuleList;
use super::selection::Selection;

/// A [`RuleList`] paired with precomputed decisions for a known branch universe.
///
/// The decision table is filled once in [`new()`](Self::new) and is read-only
/// afterwards, so a selector can be shared across threads without locking.
/// Keys outside the universe fall back to direct evaluation; either way the
/// answer equals [`RuleList::should_keep()`].
#[derive(Debug, Clone)]
pub struct BranchSelector {
    rules: Arc<RuleList>,
    decisions: HashMap<BranchKey, bool>,
    order: Vec<BranchKey>,
}

impl BranchSelector {
    /// Evaluate every branch in `branches` once and keep the results.
    ///
    /// Duplicate keys are evaluated once; the first occurrence fixes the order.
    pub fn new<I>(rules: impl Into<Arc<RuleList>>, branches: I) -> Self
    where
        I: IntoIterator<Item = BranchKey>,
    {
        let rules = rules.into();
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        for key in branches {
            if seen.insert(key.clone()) {
                order.push(key);
            }
        }

        let decisions = build_decisions(&rules, &order);

        debug!(
            branches = order.len(),
            kept = decisions.values().filter(|&&kept| kept).count(),
            rules = rules.len(),
            "built branch selector"
        );

        Self {
            rules,
            decisions,
            order,
        }
    }

    #[must_use]
    pub fn should_keep(&self, key: &BranchKey) -> bool {
        match self.decisions.get(key) {
            Some(&kept) => kept,
            None => self.rules.should_keep(key),
        }
    }

    /// Kept branches of the universe, in the order they were supplied.
    pub fn kept(&self) -> impl Iterator<Item = &BranchKey> + '_ {
        self.order.iter().filter(|key| self.decisions[*key])
    }

    /// The universe partitioned into kept and dropped branches.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::default();
        for key in &self.order {
            selection.push(key.clone(), self.decisions[key]);
        }
        selection
    }

    #[must_use]
    pub fn rules(&self) -> &Arc<RuleList> {
        &self.rules
    }

    /// Number of branches in the precomputed universe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(not(feature = "parallel"))]
fn build_decisions(rules: &RuleList, branches: &[BranchKey]) -> HashMap<BranchKey, bool> {
    branches
        .iter()
        .map(|key| (key.clone(), rules.should_keep(key)))
        .collect()
}

#[cfg(feature = "parallel")]
fn build_decisions(rules: &RuleList, branches: &[BranchKey]) -> HashMap<BranchKey, bool> {
    use rayon::prelude::*;

    branches
        .par_iter()
        .map(|key| (key.clone(), rules.should_keep(key)))
        .collect()
}

impl fmt::Display for BranchSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BranchSelector({} branches, {} kept, {} rules)",
            self.order.len(),
            self.kept().count(),
            self.rules.len(),
        )
    }
}
