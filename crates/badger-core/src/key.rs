//! Signature keys: generation, binary import/export and base64 text encoding.
//!
//! Keys are Ed25519. The binary format is the PKCS#8 (private) and
//! SubjectPublicKeyInfo (public) DER encoding provided by `ed25519-dalek`.

use ed25519_dalek::pkcs8::spki::{DecodePublicKey, EncodePublicKey};
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use ed25519_dalek::{SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

use crate::codec;
use crate::error::{BadgeError, Result};
use crate::password::PasswordStream;

/// Which half of a key to export or encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPart {
    Public,
    Private,
}

/// A signature key. Holds the public half and, optionally, the private half.
///
/// The private half is wiped from memory when the key is dropped.
#[derive(Clone)]
pub struct Key {
    verifying: VerifyingKey,
    signing: Option<SigningKey>,
}

impl Key {
    /// Derive a key from a password. The same password always gives the same key.
    pub fn generate(password: &str) -> Result<Self> {
        let mut stream = PasswordStream::new(password.as_bytes())?;

        let mut secret = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        stream
            .try_fill_bytes(&mut secret[..])
            .map_err(|e| BadgeError::Rng(e.to_string()))?;

        Ok(Self::from_signing(SigningKey::from_bytes(&secret)))
    }

    /// Generate a fresh key from the thread-local CSPRNG.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::from_signing(SigningKey::generate(&mut rng))
    }

    /// Import binary key data (PKCS#8 private key or SPKI public key DER).
    pub fn import(data: &[u8]) -> Result<Self> {
        if let Ok(signing) = SigningKey::from_pkcs8_der(data) {
            return Ok(Self::from_signing(signing));
        }

        let verifying = VerifyingKey::from_public_key_der(data)
            .map_err(|e| BadgeError::KeyFormat(e.to_string()))?;
        Ok(Self {
            verifying,
            signing: None,
        })
    }

    /// Import a key from base64 text.
    pub fn decode(text: &str) -> Result<Self> {
        let data = Zeroizing::new(codec::decode("key", text)?);
        Self::import(&data)
    }

    /// Export binary key data.
    ///
    /// Fails with `NotPrivate` if the private half is requested from a
    /// public-only key.
    pub fn export(&self, part: KeyPart) -> Result<Zeroizing<Vec<u8>>> {
        match part {
            KeyPart::Private => {
                let signing = self.signing.as_ref().ok_or(BadgeError::NotPrivate)?;
                let document = signing
                    .to_pkcs8_der()
                    .map_err(|e| BadgeError::Serialization(e.to_string()))?;
                Ok(Zeroizing::new(document.as_bytes().to_vec()))
            }
            KeyPart::Public => {
                let document = self
                    .verifying
                    .to_public_key_der()
                    .map_err(|e| BadgeError::Serialization(e.to_string()))?;
                Ok(Zeroizing::new(document.as_bytes().to_vec()))
            }
        }
    }

    /// Export and base64-encode.
    pub fn encode(&self, part: KeyPart) -> Result<Zeroizing<String>> {
        let data = self.export(part)?;
        Ok(Zeroizing::new(codec::encode(&data)?))
    }

    /// Whether this key can sign.
    pub fn has_private(&self) -> bool {
        self.signing.is_some()
    }

    /// A copy holding only the public half.
    pub fn public(&self) -> Self {
        Self {
            verifying: self.verifying,
            signing: None,
        }
    }

    /// Short hex identifier of the public half, for logs.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(self.verifying.as_bytes());
        hex::encode(&hash.as_bytes()[..8])
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }

    pub(crate) fn signing_key(&self) -> Option<&SigningKey> {
        self.signing.as_ref()
    }

    fn from_signing(signing: SigningKey) -> Self {
        Self {
            verifying: signing.verifying_key(),
            signing: Some(signing),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = if self.has_private() { "private" } else { "public" };
        write!(f, "Key({}, {})", self.fingerprint(), half)
    }
}
