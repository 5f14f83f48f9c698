//! Loading parser declarations from files.
//!
//! A [`ParserConfig`] can live next to a program as JSON or YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! name: parser
//! description: Copies things around
//! path: true
//! separator: "="
//! help:
//!   name: --help
//!   short: -h
//! schema:
//!   flag:
//!     type: string
//!     short: -f
//!     required: true
//!   test:
//!     type: number
//!     example: "42"
//!   new:
//!     type: boolean
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;
use crate::types::ParserConfig;

/// On-disk encoding of a parser declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from the file extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl ParserConfig {
    /// Loads a declaration from a JSON or YAML file.
    ///
    /// The format follows the extension (`.json`, `.yaml`, `.yml`). Other
    /// extensions are tried as JSON first, then as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::JsonError`] / [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Json) => {
                let reader = BufReader::new(std::fs::File::open(path)?);
                Ok(serde_json::from_reader(reader)?)
            }
            Some(ConfigFormat::Yaml) => {
                let reader = BufReader::new(std::fs::File::open(path)?);
                Ok(serde_yaml::from_reader(reader)?)
            }
            None => {
                let raw = std::fs::read_to_string(path)?;
                Self::from_str_any(&raw)
            }
        }
    }

    /// Parses a declaration from text that may be JSON or YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::YamlError`] if the text is neither valid JSON
    /// nor valid YAML.
    pub fn from_str_any(raw: &str) -> Result<Self, ConfigError> {
        match serde_json::from_str(raw) {
            Ok(config) => Ok(config),
            Err(err) => {
                debug!(error = %err, "Declaration is not JSON, trying YAML");
                Ok(serde_yaml::from_str(raw)?)
            }
        }
    }

    /// Saves the declaration in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or a
    /// serialization error from the chosen format.
    pub fn save(&self, path: impl AsRef<Path>, format: ConfigFormat) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        match format {
            ConfigFormat::Json => serde_json::to_writer_pretty(writer, self)?,
            ConfigFormat::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{HelpConfig, OptionSchema, OptionType, Schema};

    fn sample_yaml() -> &'static str {
        r#"
name: parser
path: true
help:
  name: --help
  short: -h
schema:
  flag:
    type: string
    short: -f
    required: true
  test:
    type: number
  new:
    type: boolean
"#
    }

    fn sample_config() -> ParserConfig {
        ParserConfig::new()
            .with_name("parser")
            .with_description("Sample")
            .with_separator(":")
            .with_help(HelpConfig::new("--help"))
            .with_schema(
                Schema::new()
                    .with_option("dir", OptionSchema::new(OptionType::Path).with_example("./src"))
                    .with_option("re", OptionSchema::new(OptionType::Pattern).required()),
            )
    }

    #[test]
    fn test_deserialize_yaml() {
        let config: ParserConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.name.as_deref(), Some("parser"));
        assert!(config.path);
        assert_eq!(config.separator, "=");
        assert_eq!(config.help, Some(HelpConfig::new("--help").with_short("-h")));

        let schema = config.schema.unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["flag", "test", "new"]);
        assert!(schema.get("flag").unwrap().required);
    }

    #[test]
    fn test_from_str_any_accepts_both_formats() {
        let from_yaml = ParserConfig::from_str_any(sample_yaml()).unwrap();
        let json = serde_json::to_string(&from_yaml).unwrap();
        let from_json = ParserConfig::from_str_any(&json).unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let original = sample_config();

        let json_path = dir.path().join("parser.json");
        original.save(&json_path, ConfigFormat::Json).unwrap();
        assert_eq!(ParserConfig::load(&json_path).unwrap(), original);

        let yaml_path = dir.path().join("parser.yml");
        original.save(&yaml_path, ConfigFormat::Yaml).unwrap();
        assert_eq!(ParserConfig::load(&yaml_path).unwrap(), original);
    }

    #[test]
    fn test_load_unknown_extension_sniffs_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parser.conf");
        fs::write(&path, sample_yaml()).unwrap();

        let config = ParserConfig::load(&path).unwrap();
        assert_eq!(config.name.as_deref(), Some("parser"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ParserConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
