use crate::errors::{BenchError, BenchResult};
use crate::table::FILENAME_COLUMN;
use std::collections::HashSet;
use std::fmt;

/// One set of compiler flags applied uniformly across a full pass over the benchmarks.
///
/// The label is the flag string exactly as declared and doubles as the table column name.
/// The empty label is the default variant and passes no flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationVariant {
    label: String,
    flags: Vec<String>,
}

impl ConfigurationVariant {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let flags = label.split_whitespace().map(str::to_string).collect();
        Self { label, flags }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whitespace-separated tokens, each passed to the compiler as its own argument
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn is_default(&self) -> bool {
        self.flags.is_empty()
    }
}

impl fmt::Display for ConfigurationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            write!(f, "<default>")
        } else {
            write!(f, "{}", self.label)
        }
    }
}

/// Build the ordered variant list, rejecting labels that would collide as column names
pub fn parse_variants<I, S>(labels: I) -> BenchResult<Vec<ConfigurationVariant>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut variants = Vec::new();
    for label in labels {
        let variant = ConfigurationVariant::new(label);
        if variant.label() == FILENAME_COLUMN {
            return Err(BenchError::Config(format!(
                "Variant label {:?} clashes with the filename column",
                FILENAME_COLUMN
            )));
        }
        if !seen.insert(variant.label().to_string()) {
            return Err(BenchError::Config(format!(
                "Variant {:?} is declared more than once",
                variant.label()
            )));
        }
        variants.push(variant);
    }
    Ok(variants)
}
