//! Transloader - translation resource importer
//!
//! Transloader scans resource directories for translation files named
//! `domain.locale.extension`, loads them into per-locale catalogues, and
//! reconciles those catalogues into a single translation store.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Import engine (loaders, catalogues, builder, reconciler, reset)
//! - `store`: Translation store trait and its implementations

pub mod cli;
pub mod config;
pub mod core;
pub mod store;
