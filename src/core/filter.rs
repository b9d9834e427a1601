//! Querying stored translations the way an administration screen filters
//! them: by locale, domain, key, message text, and translation state.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::store::{KeyStore, StoreError, TranslationKey};

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("locale '{locale}' is not a managed locale (managed: {managed})")]
    UnmanagedLocale { locale: String, managed: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Criteria for [`search`]. Every criterion left empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFilter {
    /// Restrict the checked locales.
    pub locales: Vec<String>,
    /// Exact domain match.
    pub domain: Option<String>,
    /// Substring of the translation key.
    pub key_contains: Option<String>,
    /// Substring of a message in a checked locale.
    pub label_contains: Option<String>,
    /// Keep only keys missing a usable message in some checked locale.
    pub untranslated_only: bool,
}

/// Locale settings the filter is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSettings {
    /// Locales offered for filtering. Empty means "any locale".
    pub managed_locales: Vec<String>,
    /// Message prefixes that mark a message as untranslated.
    pub empty_prefixes: Vec<String>,
}

impl LocaleSettings {
    /// Managed locales without duplicates, in configured order.
    pub fn locale_choices(&self) -> Vec<String> {
        let mut choices: Vec<String> = Vec::new();
        for locale in &self.managed_locales {
            if !choices.contains(locale) {
                choices.push(locale.clone());
            }
        }
        choices
    }

    fn is_untranslated(&self, message: &str) -> bool {
        message.is_empty()
            || self
                .empty_prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && message.starts_with(prefix.as_str()))
    }
}

/// A stored key with the messages of its checked locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyView {
    pub key: TranslationKey,
    pub messages: BTreeMap<String, String>,
}

/// Find stored keys matching `filter`, ordered by `(domain, key)`.
pub fn search(
    store: &dyn KeyStore,
    filter: &KeyFilter,
    settings: &LocaleSettings,
) -> Result<Vec<KeyView>, FilterError> {
    if !settings.managed_locales.is_empty()
        && let Some(locale) = filter
            .locales
            .iter()
            .find(|l| !settings.managed_locales.contains(l))
    {
        return Err(FilterError::UnmanagedLocale {
            locale: locale.clone(),
            managed: settings.managed_locales.join(", "),
        });
    }

    let requested: Option<&[String]> = if !filter.locales.is_empty() {
        Some(filter.locales.as_slice())
    } else if !settings.managed_locales.is_empty() {
        Some(settings.managed_locales.as_slice())
    } else {
        None
    };

    let mut views = Vec::new();
    for key in store.find_all()? {
        if let Some(domain) = &filter.domain
            && &key.domain != domain
        {
            continue;
        }
        if let Some(needle) = &filter.key_contains
            && !key.trans_key.contains(needle.as_str())
        {
            continue;
        }

        let stored: BTreeMap<String, String> = store
            .messages(&key)?
            .into_iter()
            .map(|m| (m.locale, m.message))
            .collect();

        let checked: Vec<String> = match requested {
            Some(locales) => locales.to_vec(),
            None => stored.keys().cloned().collect(),
        };
        let messages: BTreeMap<String, String> = stored
            .into_iter()
            .filter(|(locale, _)| checked.contains(locale))
            .collect();

        if let Some(needle) = &filter.label_contains
            && !messages.values().any(|m| m.contains(needle.as_str()))
        {
            continue;
        }
        if filter.untranslated_only && !is_untranslated(&checked, &messages, settings) {
            continue;
        }

        views.push(KeyView { key, messages });
    }

    Ok(views)
}

fn is_untranslated(
    checked: &[String],
    messages: &BTreeMap<String, String>,
    settings: &LocaleSettings,
) -> bool {
    // A key without any message is untranslated whatever the locales
    if messages.is_empty() {
        return true;
    }
    checked.iter().any(|locale| match messages.get(locale) {
        Some(message) => settings.is_untranslated(message),
        None => true,
    })
}

/// Distinct stored domains, sorted.
pub fn available_domains(store: &dyn KeyStore) -> Result<Vec<String>, StoreError> {
    store.domains()
}
