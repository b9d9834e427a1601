//! Import engine.
//!
//! The pipeline runs strictly in sequence:
//!
//! 1. **Plan**: discover resource files and resolve a loader for each one
//! 2. **Reset** (optional): delete everything in the store
//! 3. **Build**: load files and merge them into per-locale catalogues
//! 4. **Reconcile**: create missing keys and, under `force`, write messages
//!
//! ## Module Structure
//!
//! - `catalogue`: per-locale message tables with first-writer-wins merging
//! - `loader`: format loaders and the extension registry
//! - `discovery`: deterministic file listing under a resource root
//! - `builder`: file classification, planning, and catalogue construction
//! - `reconcile`: catalogue-to-store reconciliation
//! - `reset`: destructive pre-clear of the store
//! - `pipeline`: the full import run
//! - `filter`: querying stored translations

pub mod builder;
pub mod catalogue;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod reconcile;
pub mod reset;

pub use builder::{BuiltCatalogues, CatalogueBuilder, ImportPlan, PlanStats, ResourceFile};
pub use catalogue::{Catalogue, Catalogues};
pub use error::{ImportError, LoadError};
pub use filter::{FilterError, KeyFilter, KeyView, LocaleSettings, available_domains, search};
pub use loader::{FormatLoader, Loader, LoaderRegistry};
pub use pipeline::{ImportOptions, ImportOutcome, run_import};
pub use reconcile::{DomainStats, ReconcilePolicy, ReconcileReport, RecordFailure, reconcile};
pub use reset::reset_all;
