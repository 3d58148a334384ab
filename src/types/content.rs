use std::fmt;

use super::rule_list::RuleList;

/// Which side of I/O a command list gates.
///
/// Both dialects share syntax and evaluation; only the attribute name differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `outputCommands`: products written out.
    Output,
    /// `inputCommands`: products read back in.
    Input,
}

impl Direction {
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Direction::Output => "outputCommands",
            Direction::Input => "inputCommands",
        }
    }

    #[must_use]
    pub fn from_attribute(attribute: &str) -> Option<Self> {
        match attribute {
            "outputCommands" => Some(Direction::Output),
            "inputCommands" => Some(Direction::Input),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// One named command list, e.g. `RECOEventContent.outputCommands`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub(crate) name: String,
    pub(crate) direction: Direction,
    pub(crate) rules: RuleList,
}

impl ContentBlock {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn rules(&self) -> &RuleList {
        &self.rules
    }
}

impl fmt::Display for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.name, self.direction, self.rules)
    }
}

/// All content blocks loaded from one configuration source, in order of
/// first definition.
///
/// # Example
///
/// ```
/// use keepdrop::{BranchKey, ContentConfig};
///
/// let config = ContentConfig::from_text(
///     "RECOEventContent.outputCommands = ['drop *', 'keep *_muons_*_*']",
/// )
/// .unwrap();
///
/// let reco = config.output("RECOEventContent").unwrap();
/// assert!(reco.should_keep(&BranchKey::new("recoMuons", "muons", "", "RECO")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentConfig {
    pub(crate) blocks: Vec<ContentBlock>,
}

impl ContentConfig {
    /// Parse content configuration text and compile every block.
    ///
    /// # Errors
    ///
    /// Returns [`KeepDropError`](crate::KeepDropError) on a syntax error, a
    /// reference to an undefined block, or any malformed rule.
    pub fn from_text(input: &str) -> Result<Self, crate::KeepDropError> {
        let parsed = crate::parse::parse(input)?;
        let config = crate::resolve::resolve(parsed)?;
        Ok(config)
    }

    /// Read a content configuration file and compile every block.
    ///
    /// # Errors
    ///
    /// Returns [`KeepDropError`](crate::KeepDropError) on I/O, syntax, or
    /// rule failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::KeepDropError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_text(&input)
    }

    #[must_use]
    pub fn block(&self, name: &str, direction: Direction) -> Option<&ContentBlock> {
        self.blocks
            .iter()
            .find(|b| b.name == name && b.direction == direction)
    }

    /// The `outputCommands` rules of block `name`.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&RuleList> {
        self.block(name, Direction::Output).map(ContentBlock::rules)
    }

    /// The `inputCommands` rules of block `name`.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&RuleList> {
        self.block(name, Direction::Input).map(ContentBlock::rules)
    }

    #[must_use]
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for ContentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: usize = self.blocks.iter().map(|b| b.rules.len()).sum();
        write!(f, "ContentConfig({} blocks, {} rules)", self.blocks.len(), rules)
    }
}
