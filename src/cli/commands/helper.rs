use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use crate::cli::args::CommonArgs;
use crate::config::{CONFIG_FILE_NAME, ConfigLoadResult, load_config};
use crate::store::SqliteKeyStore;

/// Configuration plus the store path a command works on.
pub struct ProjectContext {
    pub loaded: ConfigLoadResult,
    pub database: PathBuf,
}

impl ProjectContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let loaded = load_config(&cwd)?;
        if loaded.from_file {
            debug!(dir = %loaded.base_dir.display(), "loaded {}", CONFIG_FILE_NAME);
        } else {
            debug!("no {} found, using defaults", CONFIG_FILE_NAME);
        }

        let database = match &common.database {
            Some(path) => cwd.join(path),
            None => loaded.resolve(&loaded.config.database),
        };

        Ok(Self { loaded, database })
    }

    /// Open the store, creating it if needed.
    pub fn open_store(&self) -> Result<SqliteKeyStore> {
        open(&self.database)
    }

    /// Open a store that an earlier import must have created.
    pub fn open_existing_store(&self) -> Result<SqliteKeyStore> {
        if !self.database.exists() {
            bail!(
                "Translation store not found: {} (run `transloader import` first)",
                self.database.display()
            );
        }
        open(&self.database)
    }
}

fn open(path: &Path) -> Result<SqliteKeyStore> {
    SqliteKeyStore::open(path)
        .map_err(|err| anyhow!("Failed to open translation store {}: {}", path.display(), err))
}
