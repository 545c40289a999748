//! Validator tool for the orbital pressure history.
//!
//! Audits every `*.json` record in the history directory without touching
//! it. Prints one `file: message` line per problem to stdout and exits 0
//! when the history is clean, 1 otherwise.

mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use orbital_core::OrbitalConfig;
use orbital_core::config::DEFAULT_CONFIG_FILE;
use orbital_history::{Problem, validate_store};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AuditToolError;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "orbital-audit",
    version,
    about = "Validate the orbital pressure history directory"
)]
struct Cli {
    /// History directory (default: the configured history dir).
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Print problems as a JSON array instead of text lines.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = u8::from(err.use_stderr());
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(&cli) {
        Ok((dir, problems)) if problems.is_empty() => {
            eprintln!("History validation OK ({})", dir.display());
            ExitCode::SUCCESS
        }
        Ok((dir, problems)) => {
            eprintln!(
                "History validation FAILED ({}): {} problem(s)",
                dir.display(),
                problems.len()
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the directory, audit it, and print the findings.
fn run(cli: &Cli) -> Result<(PathBuf, Vec<Problem>), AuditToolError> {
    let config = OrbitalConfig::load_or_default(&cli.config)?;
    init_tracing(&config.logging.level);

    let dir = resolve_dir(cli, &config);
    info!(dir = %dir.display(), "orbital-audit starting");

    let problems = validate_store(&dir);
    print!("{}", render_problems(&problems, cli.json)?);
    Ok((dir, problems))
}

/// Install the fmt subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// `--dir` when given, the configured history directory otherwise.
fn resolve_dir(cli: &Cli, config: &OrbitalConfig) -> PathBuf {
    cli.dir
        .as_deref()
        .map_or_else(|| config.history.dir.clone(), Path::to_path_buf)
}

/// Text lines (`file: message`) or a pretty JSON array.
fn render_problems(problems: &[Problem], json: bool) -> Result<String, AuditToolError> {
    if json {
        let mut out = serde_json::to_string_pretty(problems)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(problems.iter().map(|p| format!("{p}\n")).collect())
}
