use anyhow::Result;

use super::{CommandResult, CommandSummary, DomainsSummary, helper::ProjectContext};
use crate::cli::args::DomainsCommand;
use crate::core::available_domains;

pub fn domains(cmd: DomainsCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let store = ctx.open_existing_store()?;
    let domains = available_domains(&store)?;

    Ok(CommandResult::new(CommandSummary::Domains(DomainsSummary {
        domains,
    })))
}
