mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::{ListSource, Operation, ParsedContent, Statement};

/// Parse content configuration text into a [`ParsedContent`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid content configuration syntax.
pub fn parse(input: &str) -> Result<ParsedContent, ParseError> {
    use winnow::Parser;
    grammar::parse_content
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
