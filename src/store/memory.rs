use std::collections::{BTreeMap, HashSet};

use super::{KeyStore, LocalizedMessage, StoreError, TranslationKey};

/// In-process [`KeyStore`].
///
/// Nothing survives the process. Write failures can be injected per
/// translation key to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    next_id: i64,
    keys: BTreeMap<(String, String), TranslationKey>,
    // key id -> locale -> message
    messages: BTreeMap<i64, BTreeMap<String, String>>,
    failing_keys: HashSet<String>,
    fail_delete: bool,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `create` and `set_message` touching `key` fail.
    pub fn fail_writes_for(&mut self, key: impl Into<String>) {
        self.failing_keys.insert(key.into());
    }

    /// Make `delete_all` fail.
    pub fn fail_delete_all(&mut self) {
        self.fail_delete = true;
    }

    /// Message stored for `(key, domain, locale)`, if any.
    pub fn message(&self, key: &str, domain: &str, locale: &str) -> Option<&str> {
        let stored = self.keys.get(&(domain.to_string(), key.to_string()))?;
        self.messages
            .get(&stored.id)
            .and_then(|by_locale| by_locale.get(locale))
            .map(String::as_str)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.values().map(BTreeMap::len).sum()
    }

    fn check_injected(&self, key: &str) -> Result<(), StoreError> {
        if self.failing_keys.contains(key) {
            return Err(StoreError::Injected(format!("write rejected for key '{}'", key)));
        }
        Ok(())
    }
}

impl KeyStore for MemoryKeyStore {
    fn find_one_by_key_and_domain(
        &self,
        key: &str,
        domain: &str,
    ) -> Result<Option<TranslationKey>, StoreError> {
        Ok(self
            .keys
            .get(&(domain.to_string(), key.to_string()))
            .cloned())
    }

    fn create(
        &mut self,
        key: &str,
        domain: &str,
        translated: bool,
    ) -> Result<TranslationKey, StoreError> {
        self.check_injected(key)?;
        if let Some(existing) = self.keys.get(&(domain.to_string(), key.to_string())) {
            return Err(StoreError::Db(format!(
                "translation key '{}' already exists in domain '{}' (#{})",
                key, domain, existing.id
            )));
        }

        self.next_id += 1;
        let created = TranslationKey {
            id: self.next_id,
            trans_key: key.to_string(),
            domain: domain.to_string(),
            translated,
        };
        self.keys
            .insert((domain.to_string(), key.to_string()), created.clone());
        Ok(created)
    }

    fn set_message(
        &mut self,
        key: &TranslationKey,
        locale: &str,
        message: &str,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        self.check_injected(&key.trans_key)?;
        if !self.keys.values().any(|k| k.id == key.id) {
            return Err(StoreError::MissingKey { id: key.id });
        }

        let by_locale = self.messages.entry(key.id).or_default();
        if overwrite || !by_locale.contains_key(locale) {
            by_locale.insert(locale.to_string(), message.to_string());
        }
        Ok(())
    }

    fn delete_all(&mut self) -> Result<usize, StoreError> {
        if self.fail_delete {
            return Err(StoreError::Injected("delete rejected".to_string()));
        }
        let deleted = self.keys.len();
        self.keys.clear();
        self.messages.clear();
        Ok(deleted)
    }

    fn find_all(&self) -> Result<Vec<TranslationKey>, StoreError> {
        Ok(self.keys.values().cloned().collect())
    }

    fn messages(&self, key: &TranslationKey) -> Result<Vec<LocalizedMessage>, StoreError> {
        Ok(self
            .messages
            .get(&key.id)
            .map(|by_locale| {
                by_locale
                    .iter()
                    .map(|(locale, message)| LocalizedMessage {
                        key_id: key.id,
                        locale: locale.clone(),
                        message: message.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
