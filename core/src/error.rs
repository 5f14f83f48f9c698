//! Error types for parsing, configuration loading and output.
//!
//! [`ParseError`] is the taxonomy raised by a parse call. Its `Display`
//! output is the one-line message a program prints before exiting, e.g.
//! `--test is required`.

use thiserror::Error;

use crate::types::OptionType;
use crate::validate::ValidationError;

/// Errors that abort a parse call.
///
/// # Examples
///
/// ```
/// use schema_args_core::{OptionType, ParseError};
///
/// let err = ParseError::WrongType {
///     expected: OptionType::Number,
///     found: "string".into(),
///     arg: Some("--test".into()),
/// };
/// assert_eq!(err.to_string(), "--test wrong type expected number found string");
/// assert_eq!(ParseError::MissingValue("--test".into()).to_string(), "--test is required");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A token names no known option.
    #[error("{}", arg_not_found_message(.0.as_deref()))]
    ArgNotFound(Option<String>),

    /// A value could not be coerced to the declared type.
    #[error("{}", wrong_type_message(.expected, .found, .arg.as_deref()))]
    WrongType {
        /// Declared option type.
        expected: OptionType,
        /// What was observed instead (a value kind or the offending value).
        found: String,
        /// Long name of the option.
        arg: Option<String>,
    },

    /// A value is empty, or a required option was not supplied.
    #[error("{0} is required")]
    MissingValue(String),

    /// A positional path was expected but none was supplied.
    #[error("An argument for path was expected but found nothing")]
    MissingPath,

    /// The parser configuration is ambiguous or malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] ValidationError),
}

fn arg_not_found_message(arg: Option<&str>) -> String {
    match arg {
        Some(arg) => format!("{arg} arguments not found"),
        None => "Arguments not found".to_string(),
    }
}

fn wrong_type_message(expected: &OptionType, found: &str, arg: Option<&str>) -> String {
    match arg {
        Some(arg) => format!("{arg} wrong type expected {expected} found {found}"),
        None => format!("Wrong type expected {expected} found {found}"),
    }
}

/// Errors raised while loading or saving a [`ParserConfig`](crate::ParserConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Errors raised by the process driver in [`run`](crate::run).
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Working directory lookup or help output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_not_found_messages() {
        assert_eq!(
            ParseError::ArgNotFound(Some("--unknown".into())).to_string(),
            "--unknown arguments not found"
        );
        assert_eq!(ParseError::ArgNotFound(None).to_string(), "Arguments not found");
    }

    #[test]
    fn test_wrong_type_without_arg() {
        let err = ParseError::WrongType {
            expected: OptionType::Path,
            found: "nope".into(),
            arg: None,
        };
        assert_eq!(err.to_string(), "Wrong type expected path found nope");
    }

    #[test]
    fn test_invalid_schema_wraps_validation_error() {
        let err: ParseError = ValidationError::DuplicateFlag("-f".into()).into();
        assert_eq!(err.to_string(), "invalid schema: duplicate flag: -f");
    }
}
