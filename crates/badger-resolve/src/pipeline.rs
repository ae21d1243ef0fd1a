//! Locator to key, and badge verification end to end.

use badger_core::{record, Badge, Key, Locator};
use tracing::{debug, info};

use crate::error::Result;
use crate::registry::SchemeRegistry;

/// Resolve `locator` and extract the public key from its record.
pub fn resolve_key(registry: &SchemeRegistry, locator: &Locator) -> Result<Key> {
    let document = registry.resolve(locator.as_str())?;
    let key = record::extract_key(&document)?;
    debug!(locator = %locator, key = %key.fingerprint(), "resolved key");
    Ok(key)
}

/// Verify `badge` against the key published for its locator.
///
/// `Ok(false)` means the signature does not match. Resolution and record
/// failures are errors, never `Ok(false)`.
pub fn verify_badge(registry: &SchemeRegistry, badge: &Badge) -> Result<bool> {
    let key = resolve_key(registry, badge.locator())?;
    let verified = badge.verify_with(&key)?;
    info!(
        locator = %badge.locator(),
        key = %key.fingerprint(),
        verified,
        "badge verification"
    );
    Ok(verified)
}
