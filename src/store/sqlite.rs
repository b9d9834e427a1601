use std::{fs, path::Path};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use super::{KeyStore, LocalizedMessage, StoreError, TranslationKey};

/// Schema version written to `store_meta`.
pub const SCHEMA_VERSION: i64 = 1;

/// [`KeyStore`] backed by a SQLite database file.
///
/// Writes join a transaction that is opened on the first write and
/// committed by [`KeyStore::flush`]. Uncommitted writes are rolled back
/// when the store is dropped.
pub struct SqliteKeyStore {
    connection: Connection,
}

impl SqliteKeyStore {
    /// Open (or create) the database at `path` and initialize its schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::Io(err.to_string()))?;
        }
        let connection = Connection::open(path)?;
        debug!(path = %path.display(), "opened translation store");
        Self::with_connection(connection)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(mut connection: Connection) -> Result<Self, StoreError> {
        connection.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&mut connection)?;
        Ok(Self { connection })
    }

    /// Open a transaction unless the connection is already in one.
    ///
    /// SQLite may end a transaction by itself (e.g. on `SQLITE_FULL`).
    fn begin_batch(&mut self) -> Result<(), StoreError> {
        if self.connection.is_autocommit() {
            self.connection.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    fn key_exists(&self, id: i64) -> Result<bool, StoreError> {
        let found: Option<i64> = self
            .connection
            .query_row(
                "SELECT id FROM translation_keys WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn initialize_schema(connection: &mut Connection) -> Result<(), StoreError> {
    let tx = connection.transaction()?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| {
            row.get(0)
        })
        .optional()?;

    match version {
        None => {
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS translation_keys (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    trans_key TEXT NOT NULL,
                    domain TEXT NOT NULL,
                    translated INTEGER NOT NULL DEFAULT 0,
                    UNIQUE (trans_key, domain)
                );
                CREATE TABLE IF NOT EXISTS translation_messages (
                    key_id INTEGER NOT NULL
                        REFERENCES translation_keys (id) ON DELETE CASCADE,
                    locale TEXT NOT NULL,
                    message TEXT NOT NULL,
                    PRIMARY KEY (key_id, locale)
                );
                CREATE INDEX IF NOT EXISTS idx_translation_keys_domain
                    ON translation_keys (domain);",
            )?;
            tx.execute(
                "INSERT INTO store_meta (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
        }
        Some(SCHEMA_VERSION) => {}
        Some(found) => {
            return Err(StoreError::SchemaVersion {
                found,
                expected: SCHEMA_VERSION,
            });
        }
    }

    tx.commit()?;
    Ok(())
}

fn row_to_key(row: &rusqlite::Row<'_>) -> rusqlite::Result<TranslationKey> {
    Ok(TranslationKey {
        id: row.get(0)?,
        trans_key: row.get(1)?,
        domain: row.get(2)?,
        translated: row.get(3)?,
    })
}

impl KeyStore for SqliteKeyStore {
    fn find_one_by_key_and_domain(
        &self,
        key: &str,
        domain: &str,
    ) -> Result<Option<TranslationKey>, StoreError> {
        let found = self
            .connection
            .query_row(
                "SELECT id, trans_key, domain, translated FROM translation_keys
                 WHERE trans_key = ?1 AND domain = ?2",
                params![key, domain],
                row_to_key,
            )
            .optional()?;
        Ok(found)
    }

    fn create(
        &mut self,
        key: &str,
        domain: &str,
        translated: bool,
    ) -> Result<TranslationKey, StoreError> {
        self.begin_batch()?;
        self.connection.execute(
            "INSERT INTO translation_keys (trans_key, domain, translated) VALUES (?1, ?2, ?3)",
            params![key, domain, translated],
        )?;
        Ok(TranslationKey {
            id: self.connection.last_insert_rowid(),
            trans_key: key.to_string(),
            domain: domain.to_string(),
            translated,
        })
    }

    fn set_message(
        &mut self,
        key: &TranslationKey,
        locale: &str,
        message: &str,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        if !self.key_exists(key.id)? {
            return Err(StoreError::MissingKey { id: key.id });
        }
        self.begin_batch()?;
        let sql = if overwrite {
            "INSERT INTO translation_messages (key_id, locale, message) VALUES (?1, ?2, ?3)
             ON CONFLICT (key_id, locale) DO UPDATE SET message = excluded.message"
        } else {
            "INSERT OR IGNORE INTO translation_messages (key_id, locale, message)
             VALUES (?1, ?2, ?3)"
        };
        self.connection
            .execute(sql, params![key.id, locale, message])?;
        Ok(())
    }

    fn delete_all(&mut self) -> Result<usize, StoreError> {
        self.flush()?;
        let tx = self.connection.transaction()?;
        tx.execute("DELETE FROM translation_messages", params![])?;
        let deleted = tx.execute("DELETE FROM translation_keys", params![])?;
        tx.commit()?;
        Ok(deleted)
    }

    fn find_all(&self) -> Result<Vec<TranslationKey>, StoreError> {
        let mut stmt = self.connection.prepare(
            "SELECT id, trans_key, domain, translated FROM translation_keys
             ORDER BY domain, trans_key",
        )?;
        let keys = stmt
            .query_map(params![], row_to_key)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn messages(&self, key: &TranslationKey) -> Result<Vec<LocalizedMessage>, StoreError> {
        let mut stmt = self.connection.prepare(
            "SELECT key_id, locale, message FROM translation_messages
             WHERE key_id = ?1 ORDER BY locale",
        )?;
        let messages = stmt
            .query_map(params![key.id], |row| {
                Ok(LocalizedMessage {
                    key_id: row.get(0)?,
                    locale: row.get(1)?,
                    message: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(messages)
    }

    fn domains(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .connection
            .prepare("SELECT DISTINCT domain FROM translation_keys ORDER BY domain")?;
        let domains = stmt
            .query_map(params![], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(domains)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.connection.is_autocommit() {
            self.connection.execute_batch("COMMIT")?;
        }
        Ok(())
    }
}
