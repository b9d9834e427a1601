//! Reconciliation of built catalogues against a [`KeyStore`].
//!
//! For every `(locale, domain, key, message)` the reconciler makes sure a
//! translation key exists, creating it when absent. Messages are only
//! written under [`ReconcilePolicy::force`], and then they overwrite what
//! the store holds. Without `force` existing keys and messages are never
//! touched, so a default run only registers new keys.

use tracing::{debug, info, warn};

use super::{catalogue::Catalogues, error::ImportError};
use crate::store::{KeyStore, StoreError, TranslationKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Write messages, overwriting stored ones for the same locale.
    pub force: bool,
}

/// Counters for one `(locale, domain)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainStats {
    pub locale: String,
    pub domain: String,
    /// Entries with a non-empty key.
    pub processed: usize,
    /// Translation keys created because they were absent.
    pub created: usize,
    /// Messages written (force only).
    pub written: usize,
    /// Entries skipped because their key was empty.
    pub skipped_empty: usize,
}

/// A single entry the store refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub locale: String,
    pub domain: String,
    pub key: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub domains: Vec<DomainStats>,
    pub failures: Vec<RecordFailure>,
}

impl ReconcileReport {
    pub fn processed(&self) -> usize {
        self.domains.iter().map(|d| d.processed).sum()
    }

    pub fn created(&self) -> usize {
        self.domains.iter().map(|d| d.created).sum()
    }

    pub fn written(&self) -> usize {
        self.domains.iter().map(|d| d.written).sum()
    }

    pub fn skipped_empty(&self) -> usize {
        self.domains.iter().map(|d| d.skipped_empty).sum()
    }

    /// True when no record failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

enum RecordOutcome {
    Created,
    Found,
}

/// Reconcile every catalogue with `store`.
///
/// Per-record store failures are collected in the report and do not stop
/// the loop. The store is flushed after each domain; a failed flush is
/// fatal.
pub fn reconcile(
    catalogues: &Catalogues,
    policy: ReconcilePolicy,
    store: &mut dyn KeyStore,
) -> Result<ReconcileReport, ImportError> {
    let mut report = ReconcileReport::default();

    for (locale, catalogue) in catalogues {
        for domain in catalogue.domains() {
            let mut stats = DomainStats {
                locale: locale.clone(),
                domain: domain.to_string(),
                ..DomainStats::default()
            };

            for (key, message) in catalogue.entries(domain) {
                if key.is_empty() {
                    stats.skipped_empty += 1;
                    continue;
                }
                stats.processed += 1;

                match reconcile_entry(store, policy, locale, domain, key, message) {
                    Ok(outcome) => {
                        if matches!(outcome, RecordOutcome::Created) {
                            stats.created += 1;
                        }
                        if policy.force {
                            stats.written += 1;
                        }
                    }
                    Err(err) => {
                        warn!(locale = %locale, domain = %domain, key = %key, "failed to store translation: {}", err);
                        report.failures.push(RecordFailure {
                            locale: locale.clone(),
                            domain: domain.to_string(),
                            key: key.to_string(),
                            error: err.to_string(),
                        });
                    }
                }
            }

            store.flush().map_err(ImportError::Store)?;
            info!(
                locale = %locale,
                domain = %domain,
                processed = stats.processed,
                created = stats.created,
                "imported domain"
            );
            report.domains.push(stats);
        }
    }

    Ok(report)
}

fn reconcile_entry(
    store: &mut dyn KeyStore,
    policy: ReconcilePolicy,
    locale: &str,
    domain: &str,
    key: &str,
    message: &str,
) -> Result<RecordOutcome, StoreError> {
    let (trans_key, outcome): (TranslationKey, RecordOutcome) =
        match store.find_one_by_key_and_domain(key, domain)? {
            Some(found) => (found, RecordOutcome::Found),
            None => (store.create(key, domain, false)?, RecordOutcome::Created),
        };

    if policy.force {
        debug!(locale = %locale, domain = %domain, key = %key, "overwriting message");
        store.set_message(&trans_key, locale, message, true)?;
    }
    Ok(outcome)
}
