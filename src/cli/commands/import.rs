use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use super::{CommandResult, CommandSummary, ImportSummary, helper::ProjectContext};
use crate::cli::args::ImportCommand;
use crate::core::{CatalogueBuilder, ImportOptions, run_import};
use crate::store::MemoryKeyStore;

pub fn import(cmd: ImportCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let config = &ctx.loaded.config;

    let roots: Vec<PathBuf> = if cmd.roots.is_empty() {
        config
            .resource_roots
            .iter()
            .map(|root| ctx.loaded.resolve(root))
            .collect()
    } else {
        cmd.roots.clone()
    };

    let registry = config.loader_registry();
    let builder = CatalogueBuilder::new(&registry).with_ignores(config.ignore_patterns()?);
    let options = ImportOptions {
        clear: cmd.clear,
        force: cmd.force,
    };
    info!(
        roots = roots.len(),
        clear = options.clear,
        force = options.force,
        dry_run = cmd.dry_run,
        "starting import"
    );

    let (outcome, database) = if cmd.dry_run {
        let mut store = MemoryKeyStore::new();
        (run_import(&builder, &roots, options, &mut store)?, None)
    } else {
        let mut store = ctx.open_store()?;
        (
            run_import(&builder, &roots, options, &mut store)?,
            Some(ctx.database.clone()),
        )
    };

    Ok(CommandResult::new(CommandSummary::Import(ImportSummary {
        roots,
        database,
        outcome,
    })))
}
