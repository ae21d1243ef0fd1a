//! Badges: a locator, a token, and the locator owner's signature over the token.
//!
//! ## JSON form
//!
//! ```text
//! { "id": "<locator>", "token": "<base64>", "signature": "<base64>" }
//! ```
//!
//! All three fields are required strings. Unknown fields are ignored on import.

use serde::Serialize;
use std::fmt;

use crate::codec;
use crate::error::{BadgeError, Result, SchemaError};
use crate::key::Key;
use crate::locator::Locator;
use crate::sign;

const DOCUMENT: &str = "badge";

/// A signed assertion binding a token to an identity locator.
///
/// Immutable once constructed. Token and signature are never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Badge {
    locator: Locator,
    token: Vec<u8>,
    signature: Vec<u8>,
}

#[derive(Serialize)]
struct BadgeDocument<'a> {
    id: &'a str,
    token: String,
    signature: String,
}

impl Badge {
    /// Assemble a badge, copying all inputs.
    pub fn new(locator: &str, token: &[u8], signature: &[u8]) -> Result<Self> {
        let locator = Locator::parse(locator)?;
        if token.is_empty() {
            return Err(SchemaError::Empty {
                document: DOCUMENT,
                field: "token",
            }
            .into());
        }
        if signature.is_empty() {
            return Err(SchemaError::Empty {
                document: DOCUMENT,
                field: "signature",
            }
            .into());
        }

        Ok(Self {
            locator,
            token: token.to_vec(),
            signature: signature.to_vec(),
        })
    }

    /// Sign `token` with `key` and assemble the badge.
    pub fn issue(locator: &str, token: &[u8], key: &Key) -> Result<Self> {
        let signature = sign::sign(token, key)?;
        Self::new(locator, token, &signature)
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn token(&self) -> &[u8] {
        &self.token
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Check the signature against a key the caller already holds,
    /// skipping locator resolution.
    pub fn verify_with(&self, key: &Key) -> Result<bool> {
        sign::verify(&self.token, &self.signature, key)
    }

    /// Serialize to the badge JSON document.
    pub fn to_json(&self) -> Result<String> {
        let document = BadgeDocument {
            id: self.locator.as_str(),
            token: codec::encode(&self.token)?,
            signature: codec::encode(&self.signature)?,
        };
        serde_json::to_string(&document).map_err(|e| BadgeError::Serialization(e.to_string()))
    }

    /// Parse a badge JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let object = codec::parse_object(DOCUMENT, text)?;

        let id = codec::require_str(&object, DOCUMENT, "id")?;
        let token = codec::require_str(&object, DOCUMENT, "token")?;
        let signature = codec::require_str(&object, DOCUMENT, "signature")?;

        let token = codec::decode("token", token)?;
        let signature = codec::decode("signature", signature)?;

        Self::new(id, &token, &signature)
    }
}

impl fmt::Debug for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Badge")
            .field("locator", &self.locator.as_str())
            .field("token_len", &self.token.len())
            .field("signature", &hex::encode(&self.signature[..self.signature.len().min(8)]))
            .finish()
    }
}
