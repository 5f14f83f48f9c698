//! Schema type definitions for declaring a parser.
//!
//! A [`ParserConfig`] describes one program: its display name, the optional
//! [`Schema`] of recognized options, whether a leading positional path is
//! accepted, and how help is requested. All types round-trip through JSON and
//! YAML with [`serde`], so a parser can be declared in a file as easily as in
//! code.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used between an option name and its value when none is configured.
pub const DEFAULT_SEPARATOR: &str = "=";

/// Prefix turning a schema key into its long flag (`flag` → `--flag`).
pub const LONG_PREFIX: &str = "--";

/// Type of value an option accepts.
///
/// Each variant carries its own coercion rule, see
/// [`SchemaElement::check_type`](crate::SchemaElement::check_type).
///
/// # Examples
///
/// ```
/// use schema_args_core::OptionType;
///
/// let kind: OptionType = serde_json::from_str("\"regexp\"").unwrap();
/// assert_eq!(kind, OptionType::Pattern);
/// assert_eq!(kind.to_string(), "regexp");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Free text; one outer pair of matching quotes is stripped.
    String,
    /// Numeric value, stored as `f64`.
    Number,
    /// Presence flag; never carries a value.
    Boolean,
    /// Filesystem-style location resolved against the working directory.
    Path,
    /// Regular expression compiled with the `regex` crate.
    #[serde(rename = "regexp")]
    Pattern,
}

impl OptionType {
    /// Returns the name used in help output and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::String => "string",
            OptionType::Number => "number",
            OptionType::Boolean => "boolean",
            OptionType::Path => "path",
            OptionType::Pattern => "regexp",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a single option.
///
/// # Examples
///
/// ```
/// use schema_args_core::{OptionSchema, OptionType};
///
/// let flag = OptionSchema::new(OptionType::String)
///     .with_short("-f")
///     .with_description("Flag to forward")
///     .required();
/// assert!(flag.required);
/// assert_eq!(flag.short.as_deref(), Some("-f"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSchema {
    /// Value type accepted by the option.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Short alias (e.g., "-f").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Description shown in help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the option must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Example value shown in help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl OptionSchema {
    /// Creates an optional option of the given type.
    pub fn new(kind: OptionType) -> Self {
        Self {
            kind,
            short: None,
            description: None,
            required: false,
            example: None,
        }
    }

    /// Adds a short alias.
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds an example value.
    pub fn with_example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered set of option declarations, keyed by bare option name.
///
/// Declaration order is kept when building in code and when deserializing
/// from a JSON or YAML mapping; help output lists options in that order.
///
/// # Examples
///
/// ```
/// use schema_args_core::{OptionSchema, OptionType, Schema};
///
/// let schema = Schema::new()
///     .with_option("flag", OptionSchema::new(OptionType::String))
///     .with_option("test", OptionSchema::new(OptionType::Number));
///
/// assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["flag", "test"]);
/// assert!(schema.get("test").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    entries: Vec<(String, OptionSchema)>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option declaration.
    ///
    /// Keys are not deduplicated here; [`validate_config`](crate::validate_config)
    /// reports duplicates.
    pub fn with_option(mut self, key: &str, option: OptionSchema) -> Self {
        self.entries.push((key.to_string(), option));
        self
    }

    /// Finds a declaration by bare key.
    pub fn get(&self, key: &str) -> Option<&OptionSchema> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, option)| option)
    }

    /// Iterates over keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(key, declaration)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSchema)> {
        self.entries.iter().map(|(k, option)| (k.as_str(), option))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, option)| (k, option)))
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping from option key to option declaration")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Schema, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, option)) = map.next_entry::<String, OptionSchema>()? {
            entries.push((key, option));
        }
        Ok(Schema { entries })
    }
}

/// Tokens that request help output.
///
/// # Examples
///
/// ```
/// use schema_args_core::HelpConfig;
///
/// let help = HelpConfig::new("--help").with_short("-h");
/// assert!(help.matches("--help"));
/// assert!(help.matches("-h"));
/// assert!(!help.matches("--hel"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpConfig {
    /// Long help token (e.g., "--help").
    pub name: String,
    /// Short help token (e.g., "-h").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
}

impl HelpConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            short: None,
        }
    }

    /// Adds a short help alias.
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    /// Checks if `token` is one of the help tokens.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.short.as_deref() == Some(token)
    }
}

/// Complete declaration of a parser.
///
/// This is the primary input type. Build it in code with the `with_*`
/// methods, or load it from a file with [`ParserConfig::load`].
///
/// # Examples
///
/// ```
/// use schema_args_core::*;
///
/// let config = ParserConfig::new()
///     .with_name("parser")
///     .with_path(true)
///     .with_help(HelpConfig::new("--help").with_short("-h"))
///     .with_schema(
///         Schema::new().with_option("flag", OptionSchema::new(OptionType::String).required()),
///     );
///
/// assert_eq!(config.separator, "=");
/// assert!(config.path);
/// assert!(validate_config(&config).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Program name shown in help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Program description shown in help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Recognized options; `None` accepts no options at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Accept a leading positional path segment.
    #[serde(default)]
    pub path: bool,
    /// Help tokens; `None` disables help.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<HelpConfig>,
    /// Separator between option name and value.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            schema: None,
            path: false,
            help: None,
            separator: default_separator(),
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_path(mut self, path: bool) -> Self {
        self.path = path;
        self
    }

    pub fn with_help(mut self, help: HelpConfig) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    /// Checks if `token` requests help under this configuration.
    pub fn is_help_token(&self, token: &str) -> bool {
        self.help.as_ref().is_some_and(|help| help.matches(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_schema_builder() {
        let option = OptionSchema::new(OptionType::Number)
            .with_short("-t")
            .with_example("42");

        assert_eq!(option.kind, OptionType::Number);
        assert_eq!(option.short, Some("-t".to_string()));
        assert_eq!(option.example, Some("42".to_string()));
        assert!(!option.required);
    }

    #[test]
    fn test_schema_keeps_json_declaration_order() {
        let json = r#"{
            "zeta": { "type": "string" },
            "alpha": { "type": "number", "required": true },
            "mid": { "type": "boolean", "short": "-m" }
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();

        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert!(schema.get("alpha").unwrap().required);
        assert_eq!(schema.get("mid").unwrap().short.as_deref(), Some("-m"));
    }

    #[test]
    fn test_schema_keeps_yaml_declaration_order() {
        let yaml = "
pattern:
  type: regexp
dir:
  type: path
  example: ./src
";
        let schema: Schema = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["pattern", "dir"]);
        assert_eq!(schema.get("pattern").unwrap().kind, OptionType::Pattern);
        assert_eq!(schema.get("dir").unwrap().example.as_deref(), Some("./src"));
    }

    #[test]
    fn test_config_defaults_when_deserialized() {
        let config: ParserConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.separator, DEFAULT_SEPARATOR);
        assert!(!config.path);
        assert!(config.schema.is_none());
        assert!(config.help.is_none());
    }

    #[test]
    fn test_is_help_token() {
        let config = ParserConfig::new().with_help(HelpConfig::new("--help").with_short("-h"));
        assert!(config.is_help_token("-h"));
        assert!(!config.is_help_token("--flag"));

        let without_help = ParserConfig::new();
        assert!(!without_help.is_help_token("--help"));
    }
}
