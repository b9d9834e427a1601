//! Format-specific resource loaders and the registry that selects them.
//!
//! Each loader turns one file into a [`Catalogue`] holding a single
//! `(locale, domain)` pair. Nested structures are flattened into dotted
//! keys (`{"cart": {"total": "Total"}}` becomes `cart.total`).
//!
//! ## Formats
//!
//! - `json`: JSON objects (`serde_json`)
//! - `yml` / `yaml`: YAML mappings (`serde_yaml`)
//! - `po`: gettext catalogues
//! - `ini` / `properties`: `key = value` files

mod json;
mod key_value;
mod po;
mod yaml;

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use enum_dispatch::enum_dispatch;

use super::{
    catalogue::Catalogue,
    error::{ImportError, LoadError},
};

pub use json::JsonLoader;
pub use key_value::KeyValueLoader;
pub use po::PoLoader;
pub use yaml::YamlLoader;

/// Formats registered by [`LoaderRegistry::with_default_loaders`].
pub const DEFAULT_FORMATS: &[&str] = &["yml", "yaml", "json", "po", "ini", "properties"];

/// Loads a single resource file into a catalogue fragment.
#[enum_dispatch]
pub trait Loader {
    /// Parse `path` as messages of `domain` for `locale`.
    fn load(&self, path: &Path, locale: &str, domain: &str) -> Result<Catalogue, LoadError>;
}

/// Every loader the registry can hold.
#[enum_dispatch(Loader)]
#[derive(Debug, Clone)]
pub enum FormatLoader {
    Json(JsonLoader),
    Yaml(YamlLoader),
    Po(PoLoader),
    KeyValue(KeyValueLoader),
}

/// Maps file extensions to loaders.
///
/// The set of *supported* formats decides which files the builder even
/// looks at. It is tracked separately from the registered loaders: a
/// format declared as supported but without a loader is a configuration
/// defect and makes [`resolve`](Self::resolve) fail.
#[derive(Debug, Clone, Default)]
pub struct LoaderRegistry {
    loaders: BTreeMap<String, FormatLoader>,
    supported: BTreeSet<String>,
}

impl LoaderRegistry {
    /// An empty registry: no loaders, no supported formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in loader registered and supported.
    pub fn with_default_loaders() -> Self {
        let mut registry = Self::new();
        registry.register("json", JsonLoader);
        registry.register("yml", YamlLoader);
        registry.register("yaml", YamlLoader);
        registry.register("po", PoLoader);
        registry.register("ini", KeyValueLoader);
        registry.register("properties", KeyValueLoader);
        registry
    }

    /// Register a loader and mark its extension as supported.
    pub fn register(&mut self, extension: impl Into<String>, loader: impl Into<FormatLoader>) {
        let extension = extension.into();
        self.supported.insert(extension.clone());
        self.loaders.insert(extension, loader.into());
    }

    /// Replace the set of supported formats.
    ///
    /// Formats without a registered loader are accepted here and only
    /// reported once a matching file asks for them.
    pub fn set_supported_formats<I, S>(&mut self, formats: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported = formats.into_iter().map(Into::into).collect();
    }

    pub fn supported_formats(&self) -> &BTreeSet<String> {
        &self.supported
    }

    pub fn is_supported(&self, extension: &str) -> bool {
        self.supported.contains(extension)
    }

    pub fn resolve(&self, extension: &str) -> Result<&FormatLoader, ImportError> {
        self.loaders
            .get(extension)
            .ok_or_else(|| ImportError::LoaderNotFound {
                extension: extension.to_string(),
            })
    }
}

/// Join a parent key and a child segment with `.`.
fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}
