//! Catalogue construction from resource roots.
//!
//! Building happens in two steps:
//!
//! 1. [`CatalogueBuilder::plan`] discovers files, classifies their names as
//!    `<domain>.<locale>.<extension>` and resolves a loader for every
//!    candidate. Nothing is read yet, so a missing loader aborts the import
//!    before anything has been written.
//! 2. [`CatalogueBuilder::load`] runs the loaders in plan order and merges
//!    each fragment into the catalogue of its locale.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info};

use super::{
    catalogue::{Catalogue, Catalogues},
    discovery::discover_files,
    error::ImportError,
    loader::{Loader, LoaderRegistry},
};

/// A resource file whose name matched `<domain>.<locale>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: PathBuf,
    pub domain: String,
    pub locale: String,
    pub format: String,
}

/// Outcome of classifying one discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Resource(ResourceFile),
    /// The name does not have exactly three dot-separated segments.
    MalformedName,
    /// The extension is not a supported format.
    UnsupportedFormat(String),
}

/// Split a file name into `(domain, locale, extension)`.
///
/// Only names with exactly two dots qualify. Segments are not validated,
/// so `.en.yml` yields an empty domain.
pub fn parse_file_name(name: &str) -> Option<(&str, &str, &str)> {
    let mut segments = name.split('.');
    let domain = segments.next()?;
    let locale = segments.next()?;
    let extension = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    Some((domain, locale, extension))
}

/// Counters for files that did not make it into the plan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlanStats {
    pub discovered: usize,
    pub malformed_names: usize,
    pub unsupported_formats: usize,
    pub ignored: usize,
    pub inaccessible: usize,
}

/// Ordered list of resource files to load.
#[derive(Debug, Default, Clone)]
pub struct ImportPlan {
    pub files: Vec<ResourceFile>,
    pub stats: PlanStats,
}

/// Catalogues produced by [`CatalogueBuilder::load`].
#[derive(Debug, Default)]
pub struct BuiltCatalogues {
    pub catalogues: Catalogues,
    pub files_loaded: usize,
    /// Messages dropped because an earlier file already defined the key.
    pub shadowed_messages: usize,
}

pub struct CatalogueBuilder<'a> {
    registry: &'a LoaderRegistry,
    ignores: Vec<Pattern>,
}

impl<'a> CatalogueBuilder<'a> {
    pub fn new(registry: &'a LoaderRegistry) -> Self {
        Self {
            registry,
            ignores: Vec::new(),
        }
    }

    /// Exclude files matching these patterns (relative to their root).
    pub fn with_ignores(mut self, ignores: Vec<Pattern>) -> Self {
        self.ignores = ignores;
        self
    }

    pub fn classify(&self, path: &Path) -> Classification {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Classification::MalformedName;
        };
        let Some((domain, locale, extension)) = parse_file_name(name) else {
            return Classification::MalformedName;
        };
        if !self.registry.is_supported(extension) {
            return Classification::UnsupportedFormat(extension.to_string());
        }
        Classification::Resource(ResourceFile {
            path: path.to_path_buf(),
            domain: domain.to_string(),
            locale: locale.to_string(),
            format: extension.to_string(),
        })
    }

    /// Discover and classify every file under `roots`, in root order.
    ///
    /// Fails with [`ImportError::LoaderNotFound`] if a candidate file has a
    /// supported extension that no loader handles.
    pub fn plan<P: AsRef<Path>>(&self, roots: &[P]) -> Result<ImportPlan, ImportError> {
        let mut plan = ImportPlan::default();

        for root in roots {
            let root = root.as_ref();
            let discovered = discover_files(root, &self.ignores);
            plan.stats.ignored += discovered.ignored_count;
            plan.stats.inaccessible += discovered.skipped_count;

            if !discovered.files.is_empty() {
                info!(root = %root.display(), files = discovered.files.len(), "searching translations");
            }

            for path in discovered.files {
                plan.stats.discovered += 1;
                match self.classify(&path) {
                    Classification::Resource(file) => {
                        self.registry.resolve(&file.format)?;
                        plan.files.push(file);
                    }
                    Classification::MalformedName => {
                        debug!(path = %path.display(), "skipping file: name is not domain.locale.extension");
                        plan.stats.malformed_names += 1;
                    }
                    Classification::UnsupportedFormat(format) => {
                        debug!(path = %path.display(), format = %format, "skipping file: unsupported format");
                        plan.stats.unsupported_formats += 1;
                    }
                }
            }
        }

        Ok(plan)
    }

    /// Load every planned file and merge it into its locale's catalogue.
    ///
    /// Each file is read, parsed and released before the next one starts.
    pub fn load(&self, plan: &ImportPlan) -> Result<BuiltCatalogues, ImportError> {
        let mut built = BuiltCatalogues::default();

        for file in &plan.files {
            let loader = self.registry.resolve(&file.format)?;
            debug!(
                path = %file.path.display(),
                locale = %file.locale,
                domain = %file.domain,
                "loading file"
            );
            let fragment = loader
                .load(&file.path, &file.locale, &file.domain)
                .map_err(|source| ImportError::Load {
                    path: file.path.clone(),
                    source,
                })?;

            let catalogue = built
                .catalogues
                .entry(file.locale.clone())
                .or_insert_with(|| Catalogue::new(file.locale.as_str()));
            let added = catalogue.merge_from(&fragment);
            built.shadowed_messages += fragment.len() - added;
            built.files_loaded += 1;
        }

        Ok(built)
    }

    /// [`plan`](Self::plan) followed by [`load`](Self::load).
    pub fn build<P: AsRef<Path>>(&self, roots: &[P]) -> Result<BuiltCatalogues, ImportError> {
        let plan = self.plan(roots)?;
        self.load(&plan)
    }
}
