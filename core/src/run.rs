//! Process-level driver around [`Parser`].
//!
//! The parser itself only returns values. This module adds the conventional
//! program behavior: help text goes to standard output and the process exits
//! successfully; a parse error is printed as one line and the process exits
//! with status 1.

use std::io::Write;

use tracing::debug;

use crate::error::RunError;
use crate::parser::Parser;
use crate::types::ParserConfig;
use crate::value::{ParseOutcome, ParsedResult};

/// Exit status used when parsing fails.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Parses with `parser`, writing help text to `out` when help was requested.
///
/// # Errors
///
/// Returns [`RunError::Parse`] if parsing fails, or [`RunError::Io`] if the
/// help text cannot be written.
///
/// # Examples
///
/// ```
/// use schema_args_core::*;
///
/// let config = ParserConfig::new().with_name("demo").with_help(HelpConfig::new("--help"));
/// let parser = Parser::new(config, ["--help"], "/work").unwrap();
///
/// let mut out = Vec::new();
/// let outcome = run_with(&parser, &mut out).unwrap();
/// assert!(outcome.is_help());
/// assert!(String::from_utf8(out).unwrap().starts_with("Program : demo\n"));
/// ```
pub fn run_with<W: Write>(parser: &Parser, out: &mut W) -> Result<ParseOutcome, RunError> {
    let outcome = parser.parse()?;
    if let ParseOutcome::Help(text) = &outcome {
        out.write_all(text.as_bytes())?;
        out.flush()?;
    }
    Ok(outcome)
}

/// Parses the process arguments against `config`.
///
/// Returns the parsed result. On help the text is written to standard output
/// and the process exits with status 0; on any error the message is written
/// to standard output and the process exits with [`FAILURE_EXIT_CODE`].
pub fn generate(config: ParserConfig) -> ParsedResult {
    let result = Parser::from_env(config).and_then(|parser| {
        let stdout = std::io::stdout();
        run_with(&parser, &mut stdout.lock())
    });

    match result {
        Ok(ParseOutcome::Parsed(parsed)) => parsed,
        Ok(ParseOutcome::Help(_)) => {
            debug!("Help written, exiting");
            std::process::exit(0);
        }
        Err(err) => {
            println!("{err}");
            std::process::exit(FAILURE_EXIT_CODE);
        }
    }
}
