//! Command-line layer: argument parsing, command orchestration and output.
//!
//! The library modules (`catalog`, `extract`, `check`, `prune`) never print;
//! everything user-facing happens here.

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod context;
mod exit_status;
mod logging;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(result.exit_status())
}
