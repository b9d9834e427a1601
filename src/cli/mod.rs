//! Command-line interface layer.

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(result.exit_status())
}
