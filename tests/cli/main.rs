use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta::internals::SettingsBindDropGuard;
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;
use transloader::store::{KeyStore, SqliteKeyStore};

mod import;
mod init;
mod list;

const BIN_NAME: &str = "transloader";
const DATABASE: &str = "translations.db";

pub struct CliTest {
    _temp_dir: TempDir,
    _settings_scope: SettingsBindDropGuard,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keep the config search inside the temp project
        fs::create_dir(project_dir.join(".git"))?;

        let mut settings = insta::Settings::clone_current();
        settings.add_filter(
            &regex::escape(&project_dir.display().to_string()),
            "[PROJECT]",
        );
        let settings_scope = settings.bind_to_scope();

        Ok(Self {
            _temp_dir: temp_dir,
            _settings_scope: settings_scope,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("RUST_LOG", "off"); // Keep tracing events out of stderr snapshots
        cmd
    }

    pub fn import_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("import");
        cmd
    }

    pub fn list_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("list");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn database_path(&self) -> PathBuf {
        self.project_dir.join(DATABASE)
    }

    pub fn open_store(&self) -> Result<SqliteKeyStore> {
        SqliteKeyStore::open(&self.database_path()).context("Failed to open test store")
    }

    /// Seed the store with one key and optional messages.
    pub fn seed(&self, key: &str, domain: &str, messages: &[(&str, &str)]) -> Result<()> {
        let mut store = self.open_store()?;
        let stored = match store.find_one_by_key_and_domain(key, domain)? {
            Some(found) => found,
            None => store.create(key, domain, false)?,
        };
        for (locale, message) in messages {
            store.set_message(&stored, locale, message, true)?;
        }
        store.flush()?;
        Ok(())
    }

    /// `(domain, key)` pairs in the store, sorted.
    pub fn stored_keys(&self) -> Result<Vec<(String, String)>> {
        let store = self.open_store()?;
        Ok(store
            .find_all()?
            .into_iter()
            .map(|k| (k.domain, k.trans_key))
            .collect())
    }

    pub fn stored_message(&self, key: &str, domain: &str, locale: &str) -> Result<Option<String>> {
        let store = self.open_store()?;
        let Some(stored) = store.find_one_by_key_and_domain(key, domain)? else {
            return Ok(None);
        };
        Ok(store
            .messages(&stored)?
            .into_iter()
            .find(|m| m.locale == locale)
            .map(|m| m.message))
    }
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn pair(domain: &str, key: &str) -> (String, String) {
    (domain.to_string(), key.to_string())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage: transloader"));
    Ok(())
}
