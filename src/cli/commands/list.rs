use std::collections::BTreeSet;

use anyhow::Result;

use super::{CommandResult, CommandSummary, ListSummary, helper::ProjectContext};
use crate::cli::args::ListCommand;
use crate::core::{KeyFilter, KeyView, search};

pub fn list(cmd: ListCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let settings = ctx.loaded.config.locale_settings();
    let store = ctx.open_existing_store()?;

    let filter = KeyFilter {
        locales: cmd.locales.clone(),
        domain: cmd.domain,
        key_contains: cmd.key,
        label_contains: cmd.label,
        untranslated_only: cmd.untranslated,
    };
    let keys = search(&store, &filter, &settings)?;

    let locales = if !cmd.locales.is_empty() {
        cmd.locales
    } else if !settings.managed_locales.is_empty() {
        settings.locale_choices()
    } else {
        present_locales(&keys)
    };

    Ok(CommandResult::new(CommandSummary::List(ListSummary {
        locales,
        keys,
    })))
}

fn present_locales(keys: &[KeyView]) -> Vec<String> {
    keys.iter()
        .flat_map(|view| view.messages.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
