use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Failure to turn one resource file into a catalogue fragment.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("top-level value must be a mapping, found {found}")]
    NotAMapping { found: &'static str },
}

/// Fatal import failures.
///
/// Per-record store failures are not represented here: the reconciler
/// collects them into its report and keeps going.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not find loader for {extension} files")]
    LoaderNotFound { extension: String },
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
    #[error("failed to reset translation store: {0}")]
    Reset(#[source] StoreError),
    #[error("translation store error: {0}")]
    Store(#[source] StoreError),
}
