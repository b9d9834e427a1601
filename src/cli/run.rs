use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, domains::domains, import::import, init::init, list::list,
    },
};

/// Dispatch to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Import(cmd)) => import(cmd),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Domains(cmd)) => domains(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
