use std::collections::BTreeMap;

/// Messages of one domain, keyed by translation key.
pub type MessageTable = BTreeMap<String, String>;

/// All translation messages known for a single locale.
///
/// Messages are grouped by domain. Adding a message for a key that the
/// domain already holds is a no-op, so when several files feed the same
/// locale the first file processed wins. Files are processed in discovery
/// order (roots in configured order, paths sorted within a root), which
/// makes the winner reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    locale: String,
    domains: BTreeMap<String, MessageTable>,
}

impl Catalogue {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            domains: BTreeMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Insert a message unless the domain already defines `key`.
    ///
    /// Returns `true` if the message was inserted.
    pub fn add_message(
        &mut self,
        domain: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> bool {
        let table = self.domains.entry(domain.into()).or_default();
        let key = key.into();
        if table.contains_key(&key) {
            return false;
        }
        table.insert(key, message.into());
        true
    }

    /// Merge every message of `other` into this catalogue without
    /// overwriting keys already present.
    ///
    /// Returns the number of messages that were actually added. The locale
    /// of `other` is not checked; callers merge fragments loaded for this
    /// catalogue's locale.
    pub fn merge_from(&mut self, other: &Catalogue) -> usize {
        let mut added = 0;
        for (domain, table) in &other.domains {
            for (key, message) in table {
                if self.add_message(domain.as_str(), key.as_str(), message.as_str()) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Domain names in sorted order.
    pub fn domains(&self) -> impl Iterator<Item = &str> + '_ {
        self.domains.keys().map(String::as_str)
    }

    /// `(key, message)` pairs of a domain in key order. Unknown domains
    /// yield nothing.
    pub fn entries<'a>(&'a self, domain: &str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.domains
            .get(domain)
            .into_iter()
            .flat_map(|table| table.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn get(&self, domain: &str, key: &str) -> Option<&str> {
        self.domains
            .get(domain)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Total number of messages across all domains.
    pub fn len(&self) -> usize {
        self.domains.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-locale catalogues produced by one build, ordered by locale.
pub type Catalogues = BTreeMap<String, Catalogue>;
