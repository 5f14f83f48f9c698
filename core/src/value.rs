//! Parsed values and parse results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{ParseError, Result};

/// A value coerced to its declared option type.
#[derive(Debug, Clone)]
pub enum TypedValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Path(PathBuf),
    Pattern(Regex),
}

impl TypedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TypedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            TypedValue::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            TypedValue::Pattern(re) => Some(re),
            _ => None,
        }
    }

    /// Whether the value counts as unset for a required option.
    ///
    /// Zero numbers, empty strings and `false` are falsy; paths and patterns
    /// never are.
    pub fn is_falsy(&self) -> bool {
        match self {
            TypedValue::Number(n) => *n == 0.0,
            TypedValue::String(s) => s.is_empty(),
            TypedValue::Boolean(b) => !b,
            TypedValue::Path(_) | TypedValue::Pattern(_) => false,
        }
    }
}

// Patterns compare by source text; `Regex` has no structural equality.
impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypedValue::String(a), TypedValue::String(b)) => a == b,
            (TypedValue::Number(a), TypedValue::Number(b)) => a == b,
            (TypedValue::Boolean(a), TypedValue::Boolean(b)) => a == b,
            (TypedValue::Path(a), TypedValue::Path(b)) => a == b,
            (TypedValue::Pattern(a), TypedValue::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TypedValue::String(s) => serializer.serialize_str(s),
            TypedValue::Number(n) => serializer.serialize_f64(*n),
            TypedValue::Boolean(b) => serializer.serialize_bool(*b),
            TypedValue::Path(p) => p.serialize(serializer),
            TypedValue::Pattern(re) => serializer.serialize_str(re.as_str()),
        }
    }
}

/// Values collected by a parse call, keyed by bare option key.
///
/// Options that were not supplied are absent: a boolean flag that was not
/// passed reads as `None`, not `Some(false)`.
///
/// # Examples
///
/// ```
/// use schema_args_core::{ParsedValues, TypedValue};
///
/// let mut values = ParsedValues::default();
/// values.insert("test", TypedValue::Number(2.0));
///
/// assert_eq!(values.get_number("test"), Some(2.0));
/// assert_eq!(values.get_str("test"), None);
/// assert_eq!(values.get_bool("new"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedValues {
    values: BTreeMap<String, TypedValue>,
}

impl ParsedValues {
    /// Stores a value, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: &str, value: TypedValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TypedValue::as_str)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(TypedValue::as_number)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(TypedValue::as_bool)
    }

    pub fn get_path(&self, key: &str) -> Option<&Path> {
        self.get(key).and_then(TypedValue::as_path)
    }

    pub fn get_pattern(&self, key: &str) -> Option<&Regex> {
        self.get(key).and_then(TypedValue::as_pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Working directory and the location selected by the positional path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathInfo {
    /// Working directory snapshot taken when the parser was built.
    pub working: PathBuf,
    /// `working` joined with the normalized path segment, or `working` itself.
    pub selected: PathBuf,
    /// Raw positional segment, when one was consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

impl PathInfo {
    /// Builds path info for `working`, resolving `segment` when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use schema_args_core::PathInfo;
    ///
    /// let info = PathInfo::resolve(Path::new("/work"), Some("./test/path"));
    /// assert_eq!(info.selected, Path::new("/work/test/path"));
    ///
    /// let info = PathInfo::resolve(Path::new("/work"), None);
    /// assert_eq!(info.selected, Path::new("/work"));
    /// ```
    pub fn resolve(working: &Path, segment: Option<&str>) -> Self {
        let selected = match segment {
            Some(segment) => join_under(working, segment),
            None => working.to_path_buf(),
        };
        Self {
            working: working.to_path_buf(),
            selected,
            segment: segment.map(String::from),
        }
    }

    /// Returns the selected location, failing when no segment was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingPath`] if the invocation had no path segment.
    pub fn require_segment(&self) -> Result<&Path> {
        match self.segment {
            Some(_) => Ok(&self.selected),
            None => Err(ParseError::MissingPath),
        }
    }
}

/// Strips a single leading `./` or `/` so the remainder joins under the working directory.
pub(crate) fn strip_leading_root(segment: &str) -> &str {
    segment
        .strip_prefix("./")
        .or_else(|| segment.strip_prefix('/'))
        .unwrap_or(segment)
}

/// Joins `segment` under `working` after [`strip_leading_root`].
///
/// A segment that is empty once stripped (`/`, `./`) selects `working` itself.
pub(crate) fn join_under(working: &Path, segment: &str) -> PathBuf {
    match strip_leading_root(segment) {
        "" => working.to_path_buf(),
        rest => working.join(rest),
    }
}

/// Result of a successful, non-help parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResult {
    pub path: PathInfo,
    /// Present only when the parser has a schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<ParsedValues>,
}

/// What a parse call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Arguments were parsed and validated.
    Parsed(ParsedResult),
    /// A help token was present; carries the rendered help text.
    Help(String),
}

impl ParseOutcome {
    pub fn is_help(&self) -> bool {
        matches!(self, ParseOutcome::Help(_))
    }

    pub fn help_text(&self) -> Option<&str> {
        match self {
            ParseOutcome::Help(text) => Some(text),
            ParseOutcome::Parsed(_) => None,
        }
    }

    pub fn into_parsed(self) -> Option<ParsedResult> {
        match self {
            ParseOutcome::Parsed(result) => Some(result),
            ParseOutcome::Help(_) => None,
        }
    }
}
