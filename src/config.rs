use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, anyhow, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{LocaleSettings, LoaderRegistry, loader::DEFAULT_FORMATS};

pub const CONFIG_FILE_NAME: &str = ".transloaderrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories scanned for translation files, in order.
    #[serde(default = "default_resource_roots")]
    pub resource_roots: Vec<String>,
    /// Path of the SQLite translation store.
    #[serde(default = "default_database")]
    pub database: String,
    /// File extensions treated as translation files.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub managed_locales: Vec<String>,
    #[serde(default = "default_empty_prefixes")]
    pub empty_prefixes: Vec<String>,
}

fn default_resource_roots() -> Vec<String> {
    vec!["translations".to_string()]
}

fn default_database() -> String {
    "translations.db".to_string()
}

fn default_formats() -> Vec<String> {
    DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect()
}

fn default_empty_prefixes() -> Vec<String> {
    vec!["__".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_roots: default_resource_roots(),
            database: default_database(),
            formats: default_formats(),
            ignores: Vec::new(),
            managed_locales: Vec::new(),
            empty_prefixes: default_empty_prefixes(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` and for
    /// format names that could never match a `domain.locale.extension`
    /// file name.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for format in &self.formats {
            if format.is_empty() || format.contains('.') {
                bail!(
                    "Invalid format in 'formats': \"{}\" (use a bare extension such as \"yml\")",
                    format
                );
            }
        }

        Ok(())
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
            .collect()
    }

    /// Built-in loaders, restricted to the configured formats.
    pub fn loader_registry(&self) -> LoaderRegistry {
        let mut registry = LoaderRegistry::with_default_loaders();
        registry.set_supported_formats(self.formats.iter().cloned());
        registry
    }

    pub fn locale_settings(&self) -> LocaleSettings {
        LocaleSettings {
            managed_locales: self.managed_locales.clone(),
            empty_prefixes: self.empty_prefixes.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
}

impl ConfigLoadResult {
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|err| anyhow!("Failed to parse config file {:?}: {}", path, err))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
