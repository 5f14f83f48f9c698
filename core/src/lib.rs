//! Schema-first command-line argument parsing.
//!
//! This crate turns a declared set of options into a parser for a program's
//! argument vector:
//!
//! - [`ParserConfig`] — program name, optional [`Schema`] of options,
//!   positional path support, help tokens and the name/value separator.
//! - [`OptionSchema`] / [`OptionType`] — one option: `string`, `number`,
//!   `boolean`, `path` or `regexp`, with short alias, description, example and
//!   requiredness.
//! - [`Parser`] — scans `--name=value` and `--flag` tokens into typed
//!   [`ParsedValues`], or renders help when a help token is present.
//! - [`ParseError`] — the failures a parse can raise; their `Display` output
//!   is the message shown to users.
//!
//! Configurations are checked with [`validate_config`] when a parser is
//! built, can be loaded from JSON or YAML with [`ParserConfig::load`], and
//! [`generate`] wraps the whole flow for a real process.
//!
//! # Example
//!
//! ```
//! use schema_args_core::*;
//!
//! let config = ParserConfig::new()
//!     .with_name("mycli")
//!     .with_help(HelpConfig::new("--help").with_short("-h"))
//!     .with_schema(
//!         Schema::new()
//!             .with_option("port", OptionSchema::new(OptionType::Number).required())
//!             .with_option("verbose", OptionSchema::new(OptionType::Boolean).with_short("-v")),
//!     );
//!
//! let parser = Parser::new(config.clone(), ["--port=8080", "-v"], "/srv").unwrap();
//! let values = parser.parse().unwrap().into_parsed().unwrap().values.unwrap();
//! assert_eq!(values.get_number("port"), Some(8080.0));
//! assert_eq!(values.get_bool("verbose"), Some(true));
//!
//! // Required options are not enforced when help is requested.
//! let parser = Parser::new(config.clone(), ["--help"], "/srv").unwrap();
//! assert!(parser.parse().unwrap().is_help());
//!
//! let parser = Parser::new(config, Vec::<String>::new(), "/srv").unwrap();
//! assert_eq!(parser.parse().unwrap_err().to_string(), "--port is required");
//! ```

mod config;
mod element;
mod error;
mod help;
mod parser;
mod run;
mod types;
mod validate;
mod value;

pub use config::ConfigFormat;
pub use element::SchemaElement;
pub use error::{ConfigError, ParseError, Result, RunError};
pub use help::{render_element, render_scoped};
pub use parser::Parser;
pub use run::{FAILURE_EXIT_CODE, generate, run_with};
pub use types::*;
pub use validate::{ValidationError, validate_config};
pub use value::{ParseOutcome, ParsedResult, ParsedValues, PathInfo, TypedValue};
