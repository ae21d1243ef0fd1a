//! Token signing and signature verification.

use ed25519_dalek::{Signature, Signer};

use crate::error::{BadgeError, Result};
use crate::key::Key;

/// Length of an encoded signature.
pub const SIGNATURE_LEN: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Sign `token` with the private half of `key`.
pub fn sign(token: &[u8], key: &Key) -> Result<Vec<u8>> {
    let signing = key.signing_key().ok_or(BadgeError::NotPrivate)?;
    let signature = signing
        .try_sign(token)
        .map_err(|e| BadgeError::Signing(e.to_string()))?;
    Ok(signature.to_bytes().to_vec())
}

/// Check `signature` over `token` against the public half of `key`.
///
/// A signature that does not match returns `Ok(false)`. Only signature bytes
/// that are not a signature encoding at all (wrong length) are an error.
pub fn verify(token: &[u8], signature: &[u8], key: &Key) -> Result<bool> {
    let signature = Signature::from_slice(signature).map_err(|_| {
        BadgeError::Verification(format!(
            "expected {} signature bytes, got {}",
            SIGNATURE_LEN,
            signature.len()
        ))
    })?;

    Ok(key.verifying_key().verify_strict(token, &signature).is_ok())
}
