use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser as ClapParser, Subcommand};
use schema_args_core::{
    ConfigError, ParseOutcome, ParsedResult, Parser, ParserConfig, RunError, run_with,
    validate_config,
};
use tracing_subscriber::EnvFilter;

/// Output format for parsed results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, ClapParser)]
#[command(name = "schema-args")]
#[command(about = "Parse command-line arguments against a declared option schema")]
struct Cli {
    /// Log parser decisions to stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments given after `--` and print the typed result or help text.
    Parse(ParseArgs),
    /// Check a parser declaration file for ambiguous or malformed options.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Parser declaration file (JSON or YAML).
    #[arg(long)]
    config: PathBuf,
    /// Directory that relative paths resolve against (default: current directory).
    #[arg(long)]
    cwd: Option<PathBuf>,
    /// Output format for the parsed result.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Parser declaration files (JSON or YAML).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(schema_args_core::FAILURE_EXIT_CODE);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("schema_args_core=debug,schema_args=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<ParserConfig, String> {
    ParserConfig::load(path).map_err(|err| match err {
        ConfigError::IoError(e) => format!("Failed to read '{}': {e}", path.display()),
        other => format!("Invalid declaration '{}': {other}", path.display()),
    })
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let config = load_config(&args.config)?;
    let working = match args.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|err| format!("Failed to read current directory: {err}"))?,
    };
    tracing::debug!(config = %args.config.display(), args = ?args.args, "Parsing arguments");

    let parser = Parser::new(config, args.args, working).map_err(|err| err.to_string())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run_with(&parser, &mut out) {
        Ok(ParseOutcome::Help(_)) => Ok(()),
        Ok(ParseOutcome::Parsed(result)) => {
            let raw = format_result(&result, args.format)?;
            writeln!(out, "{raw}").map_err(|err| format!("Failed to write result: {err}"))
        }
        Err(RunError::Parse(err)) => Err(err.to_string()),
        Err(RunError::Io(err)) => Err(format!("Failed to write help: {err}")),
    }
}

fn format_result(result: &ParsedResult, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(result)
            .map(|raw| raw.trim_end().to_string())
            .map_err(|e| format!("YAML serialization failed: {e}")),
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = Vec::new();
    for path in &args.inputs {
        let config = load_config(path)?;
        match validate_config(&config).first() {
            Some(err) => failures.push(format!("{}: {err}", path.display())),
            None => {
                let options = config.schema.as_ref().map_or(0, |schema| schema.len());
                println!("{}: ok ({options} option(s))", path.display());
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} invalid declaration(s):\n{}",
            failures.len(),
            failures.join("\n")
        ))
    }
}
