//! Argument scanning, help detection and result aggregation.
//!
//! A [`Parser`] is built once from a [`ParserConfig`], the argument tokens
//! (without the program invocation token) and a working directory. Each call
//! to [`Parser::parse`] then picks one of two modes:
//!
//! - **help**: a token equals the configured help name or short alias. No
//!   value is validated; the outcome carries whole-program help, or help for
//!   the options named before the help token.
//! - **parse**: every token is resolved against the schema, coerced, and the
//!   required options are checked in declaration order.
//!
//! # Example
//!
//! ```
//! use schema_args_core::*;
//!
//! let config = ParserConfig::new()
//!     .with_name("parser")
//!     .with_path(true)
//!     .with_schema(
//!         Schema::new()
//!             .with_option("flag", OptionSchema::new(OptionType::String).with_short("-f").required())
//!             .with_option("test", OptionSchema::new(OptionType::Number))
//!             .with_option("new", OptionSchema::new(OptionType::Boolean)),
//!     );
//!
//! let parser = Parser::new(config, ["test/path", "--flag=\"test\"", "--test=2", "--new"], "/work").unwrap();
//! let result = parser.parse().unwrap().into_parsed().unwrap();
//!
//! assert_eq!(result.path.selected, std::path::Path::new("/work/test/path"));
//! let values = result.values.unwrap();
//! assert_eq!(values.get_str("flag"), Some("test"));
//! assert_eq!(values.get_number("test"), Some(2.0));
//! assert_eq!(values.get_bool("new"), Some(true));
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::element::SchemaElement;
use crate::error::{ParseError, Result, RunError};
use crate::help::{render_program, render_scoped};
use crate::types::{HelpConfig, LONG_PREFIX, OptionType, ParserConfig};
use crate::validate::validate_config;
use crate::value::{ParseOutcome, ParsedResult, ParsedValues, PathInfo, TypedValue};

/// Schema-driven argument parser.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    elements: Option<Vec<SchemaElement>>,
    args: Vec<String>,
    segment: Option<String>,
    working: PathBuf,
}

impl Parser {
    /// Builds a parser over `args`, resolving paths against `working`.
    ///
    /// When the configuration accepts a path, the leading token is consumed as
    /// the path segment unless it is a help token or starts with `--`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidSchema`] if the configuration fails
    /// [`validate_config`].
    pub fn new<I, S>(config: ParserConfig, args: I, working: impl Into<PathBuf>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(err) = validate_config(&config).into_iter().next() {
            return Err(err.into());
        }

        let mut args: Vec<String> = args.into_iter().map(Into::into).collect();
        let consumes_segment = config.path
            && args
                .first()
                .is_some_and(|first| !config.is_help_token(first) && !first.starts_with(LONG_PREFIX));
        let segment = if consumes_segment {
            let segment = args.remove(0);
            debug!(segment = %segment, "Consumed path segment");
            Some(segment)
        } else {
            None
        };

        let elements = config.schema.as_ref().map(|schema| {
            schema
                .iter()
                .map(|(key, option)| SchemaElement::new(key, option))
                .collect()
        });

        Ok(Self {
            config,
            elements,
            args,
            segment,
            working: working.into(),
        })
    }

    /// Builds a parser from the process arguments and current directory.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Io`] if the current directory cannot be read, or
    /// [`RunError::Parse`] if the configuration is invalid.
    pub fn from_env(config: ParserConfig) -> std::result::Result<Self, RunError> {
        let working = std::env::current_dir()?;
        Ok(Self::new(config, std::env::args().skip(1), working)?)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Materialized options in declaration order; `None` without a schema.
    pub fn elements(&self) -> Option<&[SchemaElement]> {
        self.elements.as_deref()
    }

    /// Tokens scanned for options (the path segment excluded).
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> &Path {
        &self.working
    }

    /// Working directory and selected location for this invocation.
    pub fn path_info(&self) -> PathInfo {
        PathInfo::resolve(&self.working, self.segment.as_deref())
    }

    /// Finds the option whose long name or short alias is `flag`.
    pub fn find_element(&self, flag: &str) -> Option<&SchemaElement> {
        self.elements.as_ref()?.iter().find(|el| el.matches(flag))
    }

    /// Parses the arguments, or renders help when a help token is present.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ArgNotFound`] for unknown options (including
    /// unknown options named before the help token),
    /// [`ParseError::WrongType`] for values that cannot be coerced, and
    /// [`ParseError::MissingValue`] for empty values or missing required
    /// options.
    pub fn parse(&self) -> Result<ParseOutcome> {
        if let Some(help) = &self.config.help {
            if self.args.iter().any(|arg| help.matches(arg)) {
                debug!(help = %help.name, "Help requested");
                return self.render_help(help).map(ParseOutcome::Help);
            }
        }

        let path = self.path_info();
        let Some(elements) = &self.elements else {
            return Ok(ParseOutcome::Parsed(ParsedResult { path, values: None }));
        };

        let mut values = ParsedValues::default();
        for arg in &self.args {
            let (flag, raw) = self.split(arg);
            let element = self
                .find_element(flag)
                .ok_or_else(|| ParseError::ArgNotFound(Some(flag.to_string())))?;

            let value = match element.kind {
                OptionType::Boolean => TypedValue::Boolean(true),
                _ => element.check_type(raw, &self.working)?,
            };
            debug!(option = %element.name, kind = %element.kind, "Resolved option");
            values.insert(&element.key, value);
        }

        for element in elements {
            element.check_exists(&values)?;
        }

        Ok(ParseOutcome::Parsed(ParsedResult {
            path,
            values: Some(values),
        }))
    }

    /// Splits a token into its flag and the value after the first separator.
    fn split<'a>(&self, arg: &'a str) -> (&'a str, Option<&'a str>) {
        match arg.split_once(self.config.separator.as_str()) {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg, None),
        }
    }

    fn is_declared_short(&self, flag: &str) -> bool {
        self.find_element(flag)
            .is_some_and(|el| el.short.as_deref() == Some(flag))
    }

    fn render_help(&self, help: &HelpConfig) -> Result<String> {
        // Long flags, declared short aliases and help tokens, in order; values never count.
        let stream: Vec<(&str, &str)> = self
            .args
            .iter()
            .map(|arg| (arg.as_str(), self.split(arg).0))
            .filter(|(arg, flag)| {
                flag.starts_with(LONG_PREFIX) || help.matches(arg) || self.is_declared_short(flag)
            })
            .collect();
        let help_index = stream
            .iter()
            .position(|(arg, _)| help.matches(arg))
            .unwrap_or(0);

        if help_index == 0 {
            debug!("Rendering program help");
            return Ok(render_program(&self.config, help, self.elements()));
        }

        let mut scoped = Vec::with_capacity(help_index);
        for (_, flag) in &stream[..help_index] {
            let element = self
                .find_element(flag)
                .ok_or_else(|| ParseError::ArgNotFound(Some(flag.to_string())))?;
            scoped.push(element);
        }
        debug!(options = scoped.len(), "Rendering scoped help");
        Ok(render_scoped(scoped, &self.config.separator))
    }
}
