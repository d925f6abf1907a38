//! Command-line interface implementation
//!
//! This module provides the CLI entry point: argument expansion, clap
//! parsing, logging setup, and dispatch to the generation run.

mod fix;

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::file_args::{expand_file_args, parse_gn_list};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// param-fixer - Generate a parameter lookup header from config files
#[derive(Parser, Debug)]
#[command(name = "param-fixer")]
#[command(about = "Merge parameter config files into a generated C header")]
#[command(version)]
pub struct Cli {
    /// Fixed parameter header file to generate
    #[arg(long)]
    pub output: PathBuf,

    /// Parameter config file (repeatable; earlier files take precedence,
    /// missing files are skipped)
    #[arg(long = "source-file", value_name = "PATH")]
    pub source_files: Vec<String>,

    /// Extra parameter as `name=value`, overriding all source files (repeatable)
    #[arg(long = "extra_parameter_cfg", value_name = "NAME=VALUE")]
    pub extra_parameter_cfgs: Vec<String>,

    /// Write a depfile listing the source files the output depends on
    #[arg(long)]
    pub depfile: Option<PathBuf>,

    /// Generator configuration file (param-fixer.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log each parameter as it is read and written
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Source file paths, with GN list literals from `@FileArg` split apart.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.source_files.iter().flat_map(|s| parse_gn_list(s)).map(PathBuf::from).collect()
    }
}

/// Initialize the global tracing subscriber.
///
/// Logs go to stderr. `RUST_LOG` takes precedence over the CLI flags.
fn init_logging(verbose: bool, quiet: bool) {
    use std::io::IsTerminal;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("param_fixer={}", level)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact()
        .finish();

    // A subscriber may already be installed when embedded in another tool
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Run the CLI with the process arguments.
pub fn run() -> ExitCode {
    run_from(std::env::args_os())
}

/// Run the CLI with explicit arguments (the first is the program name).
pub fn run_from<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
{
    let args = match expand_file_args(args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_INVALID_ARGS } else { EXIT_SUCCESS };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose, cli.quiet);
    fix::run_fix(&cli)
}
