use std::fmt;

use super::branch_key::BranchKey;

/// A branch set partitioned into kept and dropped branches.
///
/// Both halves preserve the order in which branches were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Selection {
    kept: Vec<BranchKey>,
    dropped: Vec<BranchKey>,
}

impl Selection {
    pub(crate) fn push(&mut self, key: BranchKey, kept: bool) {
        if kept {
            self.kept.push(key);
        } else {
            self.dropped.push(key);
        }
    }

    #[must_use]
    pub fn kept(&self) -> &[BranchKey] {
        &self.kept
    }

    #[must_use]
    pub fn dropped(&self) -> &[BranchKey] {
        &self.dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kept.len() + self.dropped.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty() && self.dropped.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<BranchKey>, Vec<BranchKey>) {
        (self.kept, self.dropped)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Selection({} kept, {} dropped)",
            self.kept.len(),
            self.dropped.len()
        )
    }
}
