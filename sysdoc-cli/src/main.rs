//! `sysdoc` command-line front end.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sysdoc_config::{InspectorConfig, SnapshotLoader};
use sysdoc_primitives::RegistryKind;
use sysdoc_query::{Inspector, Report};
use tracing::debug;

const DEFAULT_CONFIG: &str = "sysdoc.json";

/// Exit status when some patterns were rejected but a result was printed.
const EXIT_REJECTED: u8 = 2;

#[derive(Parser)]
#[command(name = "sysdoc", version, about = "Inspect functions, docs and signatures of loaded registries")]
struct Cli {
    /// Path to the configuration file (defaults to ./sysdoc.json when present)
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List qualified function names
    ListFunctions(Selector),
    /// List modules owning the matched functions
    ListModules(Selector),
    /// Show documentation for the matched functions
    Doc(Selector),
    /// Show argument specifications
    Argspec {
        /// Registry to query
        #[arg(short, long, default_value = "execution")]
        kind: RegistryKind,
        /// Module, function, or glob to narrow the report
        pattern: Option<String>,
    },
}

#[derive(Args)]
struct Selector {
    /// Registry to query
    #[arg(short, long, default_value = "execution")]
    kind: RegistryKind,
    /// Modules, functions, or globs; none selects everything
    patterns: Vec<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), Path::new(DEFAULT_CONFIG))?;
    sysdoc_telemetry::init(config.log_filter())?;
    debug!(?config, "configuration loaded");

    let inspector = Inspector::new(SnapshotLoader::from_config(&config));
    let out = &mut std::io::stdout().lock();
    let warn = &mut std::io::stderr().lock();
    let clean = match cli.command {
        Command::ListFunctions(selector) => emit(
            inspector.list_functions(selector.kind, selector.patterns.as_slice())?,
            out,
            warn,
        )?,
        Command::ListModules(selector) => emit(
            inspector.list_modules(selector.kind, selector.patterns.as_slice())?,
            out,
            warn,
        )?,
        Command::Doc(selector) => emit(inspector.doc(selector.kind, selector.patterns.as_slice())?, out, warn)?,
        Command::Argspec { kind, pattern } => emit(inspector.argspec(kind, pattern.as_deref())?, out, warn)?,
    };

    Ok(ExitCode::from(exit_status(clean)))
}

/// Loads `path` when given, else `default` when it exists, else built-in
/// defaults.
fn load_config(path: Option<&Path>, default: &Path) -> Result<InspectorConfig> {
    let path = match path {
        Some(path) => path,
        None if default.exists() => default,
        None => return Ok(InspectorConfig::default()),
    };
    InspectorConfig::load(path).with_context(|| format!("loading configuration from {}", path.display()))
}

/// Writes the report as pretty JSON to `out` and one `warning:` line per
/// rejected pattern to `warn`. Returns whether every pattern was accepted.
fn emit<T: Serialize>(report: Report<T>, out: &mut impl Write, warn: &mut impl Write) -> Result<bool> {
    let (value, rejected) = report.into_parts();
    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    for err in &rejected {
        writeln!(warn, "warning: {err}")?;
    }
    Ok(rejected.is_empty())
}

fn exit_status(clean: bool) -> u8 {
    if clean { 0 } else { EXIT_REJECTED }
}
