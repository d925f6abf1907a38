//! Header generation command

use std::process::ExitCode;

use super::{Cli, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::load_config;
use crate::fixer::{fix_parameter_config, FixOptions};

/// Run header generation for parsed arguments
pub fn run_fix(cli: &Cli) -> ExitCode {
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let options = FixOptions {
        output: cli.output.clone(),
        source_files: cli.source_paths(),
        extra_parameters: cli.extra_parameter_cfgs.clone(),
        depfile: cli.depfile.clone(),
        config,
    };

    match fix_parameter_config(&options) {
        Ok(report) => {
            if !report.sources_missing.is_empty() {
                tracing::debug!("{} source file(s) not found", report.sources_missing.len());
            }
            if let Some(changed) = report.changed_since_last {
                tracing::info!("{} parameter(s) changed since the previous header", changed);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
