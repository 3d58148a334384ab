use crate::Direction;

/// The result of parsing content configuration text: statements in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContent {
    pub statements: Vec<Statement>,
}

/// One assignment or method call on a block's command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub block: String,
    pub direction: Direction,
    pub op: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `X.outputCommands = [...]`
    Assign(Vec<String>),
    /// `X.outputCommands.append('...')`
    Append(String),
    /// `X.outputCommands.extend(...)`
    Extend(ListSource),
}

/// Argument of `extend`: a literal list or another block's current commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    Literal(Vec<String>),
    Block { block: String, direction: Direction },
}
