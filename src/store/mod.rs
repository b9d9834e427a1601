//! Persistent storage of translation keys and their localized messages.
//!
//! The import engine only talks to the [`KeyStore`] trait. Two stores are
//! provided:
//!
//! - [`MemoryKeyStore`]: in-process, used for dry runs and tests
//! - [`SqliteKeyStore`]: durable store backed by SQLite

mod memory;
mod sqlite;

use thiserror::Error;

pub use memory::MemoryKeyStore;
pub use sqlite::{SCHEMA_VERSION, SqliteKeyStore};

/// Errors reported by a [`KeyStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(String),
    #[error("store io error: {0}")]
    Io(String),
    #[error("translation key #{id} does not exist")]
    MissingKey { id: i64 },
    #[error("unsupported store schema version {found} (expected {expected})")]
    SchemaVersion { found: i64, expected: i64 },
    #[error("{0}")]
    Injected(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Db(err.to_string())
    }
}

/// A stored translation key, unique per `(trans_key, domain)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationKey {
    pub id: i64,
    pub trans_key: String,
    pub domain: String,
    /// Whether the key was marked as translated when it was created.
    pub translated: bool,
}

/// The message of a translation key for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedMessage {
    pub key_id: i64,
    pub locale: String,
    /// An empty message means "untranslated".
    pub message: String,
}

/// Persistence capability used by the import engine.
///
/// Writes may be buffered until [`flush`](Self::flush) is called.
pub trait KeyStore {
    /// Look up a key by exact `(key, domain)` match.
    fn find_one_by_key_and_domain(
        &self,
        key: &str,
        domain: &str,
    ) -> Result<Option<TranslationKey>, StoreError>;

    fn create(
        &mut self,
        key: &str,
        domain: &str,
        translated: bool,
    ) -> Result<TranslationKey, StoreError>;

    /// Store `message` for `locale` on `key`.
    ///
    /// With `overwrite == false` an existing message for the locale is kept.
    fn set_message(
        &mut self,
        key: &TranslationKey,
        locale: &str,
        message: &str,
        overwrite: bool,
    ) -> Result<(), StoreError>;

    /// Delete every key together with its messages. Returns the number of
    /// deleted keys.
    fn delete_all(&mut self) -> Result<usize, StoreError>;

    /// Every stored key, ordered by `(domain, trans_key)`.
    fn find_all(&self) -> Result<Vec<TranslationKey>, StoreError>;

    /// Messages of `key`, ordered by locale.
    fn messages(&self, key: &TranslationKey) -> Result<Vec<LocalizedMessage>, StoreError>;

    /// Distinct domains, sorted.
    fn domains(&self) -> Result<Vec<String>, StoreError> {
        let mut domains: Vec<String> = self.find_all()?.into_iter().map(|k| k.domain).collect();
        domains.sort();
        domains.dedup();
        Ok(domains)
    }

    /// Persist buffered writes.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
