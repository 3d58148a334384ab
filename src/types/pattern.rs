use std::fmt;

use super::branch_key::BranchKey;

/// One field of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// `*`: matches any value, including the empty string.
    Wildcard,
    /// Matches exactly this string. An empty literal matches only an empty field.
    Literal(String),
}

impl Field {
    #[inline]
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Field::Wildcard => true,
            Field::Literal(literal) => literal == value,
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Field::Wildcard)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Wildcard => f.write_str("*"),
            Field::Literal(literal) => f.write_str(literal),
        }
    }
}

/// A 4-field branch template: class, module label, instance, process.
///
/// Construct through [`Rule::parse`](super::Rule::parse) or
/// [`Pattern::new`]; matching is a plain field-by-field comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    fields: [Field; 4],
}

impl Pattern {
    #[must_use]
    pub fn new(fields: [Field; 4]) -> Self {
        Self { fields }
    }

    /// The pattern produced by a bare `*`.
    #[must_use]
    pub fn any() -> Self {
        Self::new([
            Field::Wildcard,
            Field::Wildcard,
            Field::Wildcard,
            Field::Wildcard,
        ])
    }

    #[must_use]
    pub fn fields(&self) -> &[Field; 4] {
        &self.fields
    }

    /// True if every field is a wildcard.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.fields.iter().all(Field::is_wildcard)
    }

    /// True iff all four fields match the key.
    #[must_use]
    pub fn matches(&self, key: &BranchKey) -> bool {
        self.fields
            .iter()
            .zip(key.fields())
            .all(|(field, value)| field.matches(value))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_universal() {
            return f.write_str("*");
        }
        let [a, b, c, d] = &self.fields;
        write!(f, "{a}_{b}_{c}_{d}")
    }
}
