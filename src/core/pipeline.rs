use std::path::Path;

use tracing::info;

use super::{
    builder::{CatalogueBuilder, PlanStats},
    error::ImportError,
    reconcile::{ReconcilePolicy, ReconcileReport, reconcile},
    reset::reset_all,
};
use crate::store::KeyStore;

/// Operator switches for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Delete every stored translation before importing.
    pub clear: bool,
    /// Overwrite stored messages with the ones from the files.
    pub force: bool,
}

#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub plan: PlanStats,
    pub files_loaded: usize,
    pub shadowed_messages: usize,
    /// Keys deleted by the reset step, if it ran.
    pub deleted: Option<usize>,
    pub report: ReconcileReport,
}

impl ImportOutcome {
    pub fn is_clean(&self) -> bool {
        self.report.is_clean()
    }
}

/// Run a complete import: plan, optional reset, load, reconcile.
///
/// Planning reads no file and writes nothing, so configuration errors
/// surface before the reset can destroy anything.
pub fn run_import<P: AsRef<Path>>(
    builder: &CatalogueBuilder<'_>,
    roots: &[P],
    options: ImportOptions,
    store: &mut dyn KeyStore,
) -> Result<ImportOutcome, ImportError> {
    let plan = builder.plan(roots)?;

    let deleted = if options.clear {
        Some(reset_all(store)?)
    } else {
        None
    };

    let built = builder.load(&plan)?;
    info!(
        files = built.files_loaded,
        locales = built.catalogues.len(),
        "built catalogues"
    );

    let report = reconcile(
        &built.catalogues,
        ReconcilePolicy {
            force: options.force,
        },
        store,
    )?;

    Ok(ImportOutcome {
        plan: plan.stats,
        files_loaded: built.files_loaded,
        shadowed_messages: built.shadowed_messages,
        deleted,
        report,
    })
}
