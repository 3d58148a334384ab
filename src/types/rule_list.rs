use std::fmt;

use super::branch_key::BranchKey;
use super::decision::Decision;
use super::error::MalformedRuleError;
use super::rule::{Action, Rule};
use super::selection::Selection;
use super::selection_report::SelectionReport;

/// Builder for constructing a [`RuleList`] one command at a time.
///
/// Commands are validated together by [`build()`](Self::build), so the first
/// malformed pattern is reported with its position in the list.
///
/// # Example
///
/// ```
/// use keepdrop::{BranchKey, RuleListBuilder};
///
/// let rules = RuleListBuilder::new()
///     .drop("*")
///     .keep("recoMuons_muons_*_*")
///     .drop("recoMuons_muons_cosmicVariant_*")
///     .build()
///     .unwrap();
///
/// assert!(rules.should_keep(&BranchKey::new("recoMuons", "muons", "", "RECO")));
/// ```
#[derive(Debug, Default)]
pub struct RuleListBuilder {
    lines: Vec<String>,
}

impl RuleListBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keep(self, pattern: &str) -> Self {
        self.command(Action::Keep, pattern)
    }

    #[must_use]
    pub fn drop(self, pattern: &str) -> Self {
        self.command(Action::Drop, pattern)
    }

    #[must_use]
    pub fn command(mut self, action: Action, pattern: &str) -> Self {
        self.lines.push(format!("{action} {pattern}"));
        self
    }

    /// Compile the commands into an immutable `RuleList`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRuleError`] for the first invalid pattern.
    pub fn build(self) -> Result<RuleList, MalformedRuleError> {
        crate::compile::compile(&self.lines)
    }
}

/// An ordered, immutable list of keep/drop rules. Thread-safe and designed to
/// live behind `Arc`.
///
/// Rule order is exactly the authored order and is never rearranged: the last
/// rule matching a branch decides it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList {
    pub(crate) rules: Vec<Rule>,
}

impl RuleList {
    /// Parse and validate an ordered sequence of command lines.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRuleError`] for the first malformed line, carrying
    /// its text and index. No partial list is produced.
    pub fn parse<I, S>(lines: I) -> Result<Self, MalformedRuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        crate::compile::compile(lines)
    }

    /// Whether the branch is kept. Never fails; unmatched branches are dropped.
    #[must_use]
    pub fn should_keep(&self, key: &BranchKey) -> bool {
        crate::evaluate::evaluate(&self.rules, key)
    }

    /// Like [`should_keep()`](Self::should_keep), also naming the deciding rule.
    pub fn decide(&self, key: &BranchKey) -> Decision {
        crate::evaluate::decide(&self.rules, key)
    }

    /// Evaluate with diagnostics: every matching rule and timing information.
    pub fn evaluate_detailed(&self, key: &BranchKey) -> SelectionReport {
        crate::evaluate::evaluate_detailed(&self.rules, key)
    }

    /// Partition a branch set into kept and dropped branches.
    pub fn select<I>(&self, branches: I) -> Selection
    where
        I: IntoIterator<Item = BranchKey>,
    {
        let mut selection = Selection::default();
        for key in branches {
            let kept = self.should_keep(&key);
            selection.push(key, kept);
        }
        selection
    }

    /// Return a new list with `line` added as the last rule.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRuleError`] if `line` is not a valid rule; its index
    /// is the position it would have taken.
    pub fn append(&self, line: &str) -> Result<Self, MalformedRuleError> {
        let rule = crate::compile::compile_rule(line, self.rules.len())?;
        let mut rules = self.rules.clone();
        rules.push(rule);
        Ok(Self { rules })
    }

    /// Return a new list with all of `other`'s rules after this list's rules.
    /// Source indices of the appended rules continue from this list.
    #[must_use]
    pub fn extend(&self, other: &RuleList) -> Self {
        let offset = self.rules.len();
        let mut rules = self.rules.clone();
        rules.extend(other.rules.iter().map(|rule| Rule {
            source_index: rule.source_index + offset,
            ..rule.clone()
        }));
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The original command lines, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::line).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(feature = "binary-cache")]
impl RuleList {
    /// Serialize this rule list to a byte vector.
    ///
    /// The optional `source_text` is hashed (BLAKE3) and embedded in the
    /// payload metadata so callers can detect a stale cache.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) if encoding fails.
    pub fn to_bytes(
        &self,
        source_text: Option<&str>,
    ) -> Result<Vec<u8>, crate::serial::SerializeError> {
        crate::serial::encode(self, source_text)
    }

    /// Deserialize a rule list previously produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// format, integrity, or validation failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::serial::DeserializeError> {
        crate::serial::decode(bytes)
    }

    /// Serialize this rule list and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) on
    /// encoding or I/O failure.
    pub fn to_binary_file(
        &self,
        path: impl AsRef<std::path::Path>,
        source_text: Option<&str>,
    ) -> Result<(), crate::serial::SerializeError> {
        let bytes = self.to_bytes(source_text)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a file and deserialize the rule list it contains.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// I/O, format, integrity, or validation failure.
    pub fn from_binary_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::serial::DeserializeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keeps = self
            .rules
            .iter()
            .filter(|r| r.action == Action::Keep)
            .count();
        write!(
            f,
            "RuleList({} rules, {} keep, {} drop)",
            self.rules.len(),
            keeps,
            self.rules.len() - keeps,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MalformedRuleKind;

    fn key(class: &str, module: &str, instance: &str, process: &str) -> BranchKey {
        BranchKey::new(class, module, instance, process)
    }

    #[test]
    fn builder_collects_commands_in_order() {
        let rules = RuleListBuilder::new()
            .drop("*")
            .keep("recoMuons_muons_*_*")
            .command(Action::Keep, "*_particleFlow_muons_*")
            .build()
            .unwrap();

        assert_eq!(
            rules.commands(),
            vec!["drop *", "keep recoMuons_muons_*_*", "keep *_particleFlow_muons_*"]
        );
    }

    #[test]
    fn builder_reports_bad_pattern_position() {
        let err = RuleListBuilder::new()
            .drop("*")
            .keep("a_b_c_d_e")
            .build()
            .unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.kind, MalformedRuleKind::TooManyFields { count: 5 });
    }

    #[test]
    fn append_continues_indices() {
        let base = RuleList::parse(["drop *"]).unwrap();
        let extended = base.append("keep *_slimmedGenJets_*_*").unwrap();

        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.rules()[1].source_index(), 1);
        assert!(extended.should_keep(&key("recoGenJets", "slimmedGenJets", "", "PAT")));
    }

    #[test]
    fn append_rejects_malformed_line() {
        let base = RuleList::parse(["drop *", "keep *_muons_*_*"]).unwrap();
        let err = base.append("keep (status = 3)").unwrap_err();
        assert_eq!(err.index, 2);
    }

    #[test]
    fn extend_reindexes_appended_rules() {
        let reco = RuleList::parse(["keep *_muons_*_*", "keep *_generalTracks_*_*"]).unwrap();
        let recosim = RuleList::parse(["drop *", "keep *_genParticles_*_*"]).unwrap();
        let merged = recosim.extend(&reco);

        let indices: Vec<usize> = merged.rules().iter().map(Rule::source_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(merged.should_keep(&key("recoTracks", "generalTracks", "", "RECO")));
        assert_eq!(merged.decide(&key("recoMuons", "muons", "", "RECO")).rule_index(), Some(2));
    }

    #[test]
    fn select_partitions_branches() {
        let rules = RuleList::parse(["drop *", "keep *_muons_*_*"]).unwrap();
        let selection = rules.select(vec![
            key("recoMuons", "muons", "", "RECO"),
            key("recoTracks", "generalTracks", "", "RECO"),
        ]);
        assert_eq!(selection.kept().len(), 1);
        assert_eq!(selection.dropped()[0].module_label(), "generalTracks");
    }

    #[test]
    fn display_summary() {
        let rules = RuleList::parse(["drop *", "keep *_muons_*_*", "keep *_jets_*_*"]).unwrap();
        assert_eq!(rules.to_string(), "RuleList(3 rules, 2 keep, 1 drop)");
    }

    #[test]
    fn rule_list_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleList>();
    }
}
