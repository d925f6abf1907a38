//! param-fixer - Command-line tool for generating parameter lookup headers

use std::process::ExitCode;

use param_fixer::cli;

fn main() -> ExitCode {
    cli::run()
}
