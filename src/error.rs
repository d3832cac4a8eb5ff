//! Error types for data loading and item formulas.
//!
//! Combat calculators never return these: an unresolvable lookup there is
//! reported as `None`. Errors are reserved for source data that cannot be
//! interpreted at all and for the item-level solvers, which reject
//! under- or over-specified input.

use std::path::PathBuf;
use thiserror::Error;

/// Format a list of accepted values as a readable string.
fn format_choices(choices: &[&str]) -> String {
    if choices.is_empty() {
        return String::from("(none)");
    }
    choices.join(", ")
}

/// Errors raised while reading or interpreting source data.
///
/// # Examples
///
/// ```rust
/// use cainstat::DataError;
///
/// let err = DataError::UnknownItemCategory("Shovels".to_string());
/// assert_eq!(err.to_string(), "Unknown item category: Shovels");
/// ```
#[derive(Debug, Error)]
pub enum DataError {
    /// A source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `CompatibleItems:` token is neither a category nor a shorthand group.
    #[error("Unknown item category: {0}")]
    UnknownItemCategory(String),

    /// A rune word block had no name line.
    #[error("Rune word entry has no name")]
    MissingName,

    /// The data configuration could not be parsed.
    #[error("Invalid data configuration: {0}")]
    Config(String),
}

/// Errors raised by the item-level and affix-level solvers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    /// Exactly two of the three values must be supplied.
    #[error("Expected exactly two of {}, got {given}", format_choices(.names))]
    WrongArity {
        names: Vec<&'static str>,
        given: usize,
    },

    /// A level was outside `1..=99`.
    #[error("{name} must be between 1 and 99, got {value}")]
    OutOfRange { name: &'static str, value: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = DataError::Io {
            path: PathBuf::from("assets/Runes/RuneInfo.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let display = err.to_string();
        assert!(display.contains("RuneInfo.txt"));
        assert!(display.contains("gone"));
    }

    #[test]
    fn test_arity_error_display() {
        let err = FormulaError::WrongArity {
            names: vec!["ilvl", "qlvl", "alvl"],
            given: 3,
        };
        let display = err.to_string();
        assert!(display.contains("ilvl, qlvl, alvl"));
        assert!(display.contains("got 3"));
    }
}
