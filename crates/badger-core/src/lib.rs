//! # Badger Core
//!
//! Pure primitives for Badger: keys, token signatures, badges, and identity
//! records.
//!
//! This crate performs no I/O. Turning a locator into a record is the job of
//! `badger-resolve`.
//!
//! ## Key Types
//!
//! - [`Key`] - Ed25519 key, public-only or with its private half
//! - [`Badge`] - A locator, a token, and a signature over the token
//! - [`Locator`] - `scheme ":" identifier` naming the signer
//! - [`ErrorKind`] - Failure category shared by every Badger error type
//!
//! ## Usage
//!
//! ```rust
//! use badger_core::{record, Badge, Key};
//!
//! let key = Key::generate("secret").unwrap();
//! let badge = Badge::issue("nmc:alice", &[b'a'; 32], &key).unwrap();
//! let json = badge.to_json().unwrap();
//!
//! // Verifier side, with the record obtained out of band.
//! let published = record::to_record(&key).unwrap();
//! let signer = record::extract_key(&published).unwrap();
//! let badge = Badge::from_json(&json).unwrap();
//! assert!(badge.verify_with(&signer).unwrap());
//! ```

pub mod badge;
pub mod codec;
pub mod error;
pub mod key;
pub mod locator;
pub mod password;
pub mod record;
pub mod sign;

pub use badge::Badge;
pub use error::{BadgeError, ErrorKind, Result, SchemaError};
pub use key::{Key, KeyPart};
pub use locator::Locator;
pub use password::{PasswordStream, MAX_PASSWORD_LEN};
pub use record::{extract_key, to_record, RECORD_KEY_FIELD};
pub use sign::{sign, verify, SIGNATURE_LEN};
