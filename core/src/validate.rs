//! Parser configuration validation.
//!
//! Catches configurations that would make token lookup ambiguous or
//! impossible (duplicate names or short aliases, keys containing the
//! separator, malformed short aliases) before any argument is parsed.
//!
//! # Examples
//!
//! ```
//! use schema_args_core::*;
//!
//! let config = ParserConfig::new().with_schema(
//!     Schema::new().with_option("verbose", OptionSchema::new(OptionType::Boolean).with_short("-v")),
//! );
//! assert!(validate_config(&config).is_empty());
//!
//! // Invalid: short alias missing leading dash
//! let bad = ParserConfig::new().with_schema(
//!     Schema::new().with_option("verbose", OptionSchema::new(OptionType::Boolean).with_short("v")),
//! );
//! assert!(!validate_config(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{LONG_PREFIX, ParserConfig};

/// Configuration validation errors.
///
/// Each variant describes one structural problem. The `Display` impl provides
/// a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Separator string is empty.
    #[error("separator cannot be empty")]
    EmptySeparator,
    /// Option key is empty or whitespace-only.
    #[error("option key cannot be empty")]
    EmptyOptionKey,
    /// Option key contains the separator or whitespace and could never match a token.
    #[error("invalid option key: {0}")]
    InvalidOptionKey(String),
    /// Short alias does not start with a dash or is too short (e.g., `"v"` instead of `"-v"`).
    #[error("invalid short flag format: {0}")]
    InvalidShortFlag(String),
    /// Help token is empty.
    #[error("help name cannot be empty")]
    EmptyHelpName,
    /// Two options (or an option and the help tokens) share the same flag.
    #[error("duplicate flag: {0}")]
    DuplicateFlag(String),
}

/// Validates a parser configuration.
///
/// Returns at most one error: validation stops at the first problem found.
/// Long names, short aliases and help tokens share one namespace, so an
/// option may not reuse the help token either.
///
/// # Examples
///
/// ```
/// use schema_args_core::*;
///
/// let config = ParserConfig::new()
///     .with_help(HelpConfig::new("--help"))
///     .with_schema(Schema::new().with_option("help", OptionSchema::new(OptionType::Boolean)));
///
/// let errors = validate_config(&config);
/// assert_eq!(errors, vec![ValidationError::DuplicateFlag("--help".into())]);
/// ```
pub fn validate_config(config: &ParserConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.separator.is_empty() {
        errors.push(ValidationError::EmptySeparator);
        return errors;
    }

    let mut seen: HashSet<String> = HashSet::new();

    if let Some(help) = &config.help {
        if help.name.trim().is_empty() {
            errors.push(ValidationError::EmptyHelpName);
            return errors;
        }
        seen.insert(help.name.clone());
        if let Some(short) = &help.short {
            if !seen.insert(short.clone()) {
                errors.push(ValidationError::DuplicateFlag(short.clone()));
                return errors;
            }
        }
    }

    let Some(schema) = &config.schema else {
        return errors;
    };

    for (key, option) in schema.iter() {
        if key.trim().is_empty() {
            errors.push(ValidationError::EmptyOptionKey);
            return errors;
        }

        if key.contains(config.separator.as_str()) || key.chars().any(char::is_whitespace) {
            errors.push(ValidationError::InvalidOptionKey(key.to_string()));
            return errors;
        }

        let long = format!("{LONG_PREFIX}{key}");
        if !seen.insert(long.clone()) {
            errors.push(ValidationError::DuplicateFlag(long));
            return errors;
        }

        if let Some(short) = &option.short {
            if !short.starts_with('-') || short.len() < 2 || short.contains(config.separator.as_str())
            {
                errors.push(ValidationError::InvalidShortFlag(short.clone()));
                return errors;
            }
            if !seen.insert(short.clone()) {
                errors.push(ValidationError::DuplicateFlag(short.clone()));
                return errors;
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::{HelpConfig, OptionSchema, OptionType, Schema};

    use super::*;

    fn config_with(schema: Schema) -> ParserConfig {
        ParserConfig::new().with_schema(schema)
    }

    #[test]
    fn test_validate_rejects_duplicate_short() {
        let config = config_with(
            Schema::new()
                .with_option("first", OptionSchema::new(OptionType::String).with_short("-f"))
                .with_option("force", OptionSchema::new(OptionType::Boolean).with_short("-f")),
        );

        let errors = validate_config(&config);
        assert_eq!(errors, vec![ValidationError::DuplicateFlag("-f".to_string())]);
    }

    #[test]
    fn test_validate_rejects_duplicate_key() {
        let config = config_with(
            Schema::new()
                .with_option("test", OptionSchema::new(OptionType::String))
                .with_option("test", OptionSchema::new(OptionType::Number)),
        );

        let errors = validate_config(&config);
        assert_eq!(errors, vec![ValidationError::DuplicateFlag("--test".to_string())]);
    }

    #[test]
    fn test_validate_rejects_short_colliding_with_help() {
        let config = config_with(
            Schema::new().with_option("host", OptionSchema::new(OptionType::String).with_short("-h")),
        )
        .with_help(HelpConfig::new("--help").with_short("-h"));

        let errors = validate_config(&config);
        assert_eq!(errors, vec![ValidationError::DuplicateFlag("-h".to_string())]);
    }

    #[test]
    fn test_validate_rejects_key_containing_separator() {
        let config = config_with(
            Schema::new().with_option("a=b", OptionSchema::new(OptionType::String)),
        );

        let errors = validate_config(&config);
        assert_eq!(errors, vec![ValidationError::InvalidOptionKey("a=b".to_string())]);
    }

    #[test]
    fn test_validate_rejects_bad_short_flag() {
        let config = config_with(
            Schema::new().with_option("verbose", OptionSchema::new(OptionType::Boolean).with_short("v")),
        );

        let errors = validate_config(&config);
        assert_eq!(errors, vec![ValidationError::InvalidShortFlag("v".to_string())]);
    }

    #[test]
    fn test_validate_rejects_empty_separator_and_help() {
        let config = ParserConfig::new().with_separator("");
        assert_eq!(validate_config(&config), vec![ValidationError::EmptySeparator]);

        let config = ParserConfig::new().with_help(HelpConfig::new(" "));
        assert_eq!(validate_config(&config), vec![ValidationError::EmptyHelpName]);
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        let config = config_with(
            Schema::new()
                .with_option("flag", OptionSchema::new(OptionType::String).with_short("-f").required())
                .with_option("test", OptionSchema::new(OptionType::Number))
                .with_option("new", OptionSchema::new(OptionType::Boolean)),
        )
        .with_help(HelpConfig::new("--help").with_short("-h"));

        assert!(validate_config(&config).is_empty());
    }
}
