use tracing::warn;

use super::error::ImportError;
use crate::store::KeyStore;

/// Delete every stored translation key and its messages.
///
/// Must complete before anything is reconciled; any failure is fatal.
/// Returns the number of deleted keys.
pub fn reset_all(store: &mut dyn KeyStore) -> Result<usize, ImportError> {
    let deleted = store.delete_all().map_err(ImportError::Reset)?;
    store.flush().map_err(ImportError::Reset)?;
    warn!(deleted, "deleted all translations from the store");
    Ok(deleted)
}
