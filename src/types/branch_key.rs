use std::fmt;
use std::str::FromStr;

use super::error::BranchKeyError;

/// Identifies one candidate data product in an event.
///
/// The four fields are always present. An empty string is a real value
/// (e.g. an unnamed product instance) and is distinct from a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchKey {
    friendly_class_name: String,
    module_label: String,
    product_instance_name: String,
    process_name: String,
}

impl BranchKey {
    pub fn new(
        friendly_class_name: impl Into<String>,
        module_label: impl Into<String>,
        product_instance_name: impl Into<String>,
        process_name: impl Into<String>,
    ) -> Self {
        Self {
            friendly_class_name: friendly_class_name.into(),
            module_label: module_label.into(),
            product_instance_name: product_instance_name.into(),
            process_name: process_name.into(),
        }
    }

    #[must_use]
    pub fn friendly_class_name(&self) -> &str {
        &self.friendly_class_name
    }

    #[must_use]
    pub fn module_label(&self) -> &str {
        &self.module_label
    }

    #[must_use]
    pub fn product_instance_name(&self) -> &str {
        &self.product_instance_name
    }

    #[must_use]
    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// The four fields in pattern order.
    #[must_use]
    pub fn fields(&self) -> [&str; 4] {
        [
            &self.friendly_class_name,
            &self.module_label,
            &self.product_instance_name,
            &self.process_name,
        ]
    }
}

/// Renders the canonical branch name, `class_module_instance_process`.
impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.friendly_class_name,
            self.module_label,
            self.product_instance_name,
            self.process_name
        )
    }
}

impl FromStr for BranchKey {
    type Err = BranchKeyError;

    /// Parse a canonical branch name. Exactly four `_`-separated fields are
    /// required; any of them may be empty, so every key without `_` inside a
    /// field parses back from its `Display` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('_').collect();
        match fields.as_slice() {
            [class, module, instance, process] => {
                Ok(Self::new(*class, *module, *instance, *process))
            }
            _ => Err(BranchKeyError::FieldCount {
                name: s.to_owned(),
                found: fields.len(),
            }),
        }
    }
}
