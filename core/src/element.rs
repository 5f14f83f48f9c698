//! Option elements: one declared option with its coercion rules.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::types::{LONG_PREFIX, OptionSchema, OptionType};
use crate::value::{ParsedValues, TypedValue, join_under};

/// Value kind reported when a token carried no value at all.
const NO_VALUE: &str = "nothing";

/// Value kind reported for a value that was present but unusable.
const STRING_VALUE: &str = "string";

/// A schema entry materialized with its validation behavior.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use schema_args_core::{OptionSchema, OptionType, SchemaElement, TypedValue};
///
/// let element = SchemaElement::new("test", &OptionSchema::new(OptionType::Number));
/// assert_eq!(element.name, "--test");
///
/// let value = element.check_type(Some("2"), Path::new("/work")).unwrap();
/// assert_eq!(value, TypedValue::Number(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaElement {
    /// Long flag token (e.g., "--flag").
    pub name: String,
    /// Bare schema key (e.g., "flag").
    pub key: String,
    pub kind: OptionType,
    pub short: Option<String>,
    pub description: Option<String>,
    pub example: Option<String>,
    pub required: bool,
}

impl SchemaElement {
    /// Materializes the declaration `option` stored under `key`.
    pub fn new(key: &str, option: &OptionSchema) -> Self {
        Self {
            name: format!("{LONG_PREFIX}{key}"),
            key: key.to_string(),
            kind: option.kind,
            short: option.short.clone(),
            description: option.description.clone(),
            example: option.example.clone(),
            required: option.required,
        }
    }

    /// Checks if `flag` is this element's long name or short alias.
    pub fn matches(&self, flag: &str) -> bool {
        self.name == flag || self.short.as_deref() == Some(flag)
    }

    /// Coerces a raw token value to this element's type.
    ///
    /// `raw` is `None` when the token had no separator. `working` anchors
    /// relative `path` values.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::WrongType`] if the value cannot be coerced, or
    /// [`ParseError::MissingValue`] if a text value is empty once its outer
    /// quotes are removed.
    pub fn check_type(&self, raw: Option<&str>, working: &Path) -> Result<TypedValue> {
        match self.kind {
            OptionType::Number => self.check_number(raw).map(TypedValue::Number),
            OptionType::String => self.check_string(raw).map(TypedValue::String),
            OptionType::Path => {
                let value = self.check_string(raw)?;
                self.check_path(&value, working).map(TypedValue::Path)
            }
            OptionType::Pattern => {
                let value = self.check_string(raw)?;
                self.check_pattern(&value).map(TypedValue::Pattern)
            }
            OptionType::Boolean => Ok(TypedValue::Boolean(true)),
        }
    }

    /// Checks that a required option is set in `values`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingValue`] if the option is required and
    /// absent or falsy (see [`TypedValue::is_falsy`]).
    pub fn check_exists(&self, values: &ParsedValues) -> Result<()> {
        let set = values.get(&self.key).is_some_and(|value| !value.is_falsy());
        if !self.required || set {
            return Ok(());
        }
        Err(ParseError::MissingValue(self.name.clone()))
    }

    fn wrong_type(&self, found: &str) -> ParseError {
        ParseError::WrongType {
            expected: self.kind,
            found: found.to_string(),
            arg: Some(self.name.clone()),
        }
    }

    fn check_number(&self, raw: Option<&str>) -> Result<f64> {
        let Some(raw) = raw else {
            return Err(self.wrong_type(NO_VALUE));
        };
        // Only finite decimal numbers; "inf" and "NaN" are text.
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(self.wrong_type(STRING_VALUE)),
        }
    }

    fn check_string(&self, raw: Option<&str>) -> Result<String> {
        let Some(raw) = raw else {
            return Err(self.wrong_type(NO_VALUE));
        };
        let value = strip_outer_quotes(raw);
        if value.is_empty() {
            return Err(ParseError::MissingValue(self.name.clone()));
        }
        Ok(value.to_string())
    }

    fn check_path(&self, value: &str, working: &Path) -> Result<PathBuf> {
        static LEADING_PATH_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^(?:.?/)+").expect("static regex must compile"));

        if !LEADING_PATH_RE.is_match(value) {
            return Err(self.wrong_type(value));
        }
        Ok(join_under(working, value))
    }

    fn check_pattern(&self, value: &str) -> Result<Regex> {
        Regex::new(value).map_err(|err| {
            debug!(option = %self.name, error = %err, "Pattern failed to compile");
            self.wrong_type(value)
        })
    }
}

/// Removes one pair of matching `"` or `'` wrapping the whole value.
fn strip_outer_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
