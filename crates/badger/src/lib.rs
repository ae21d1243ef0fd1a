//! # Badger
//!
//! Signed identity badges. A badge binds an opaque token to a locator
//! (`nmc:alice`, `id:alice`, `https://example.org/alice.json`); anyone can
//! verify it by resolving the locator to the signer's published public key.
//!
//! ## Overview
//!
//! - **Keys**: Ed25519, derived from a password or random, exported as
//!   PKCS#8 / SPKI DER and base64
//! - **Badges**: `{"id", "token", "signature"}` JSON documents
//! - **Records**: `{"dsa": "<base64 public key>"}`, published under a locator
//! - **Resolution**: a scheme registry maps locator prefixes to resolvers
//!
//! ## Usage
//!
//! ```rust
//! use badger::{from_fn, Badger, Key, SchemeRegistry};
//!
//! let key = Key::generate("secret").unwrap();
//! let record = badger::core::to_record(&key).unwrap();
//!
//! // Stand-in for the namecoin resolver.
//! let registry = SchemeRegistry::new();
//! registry.register("nmc:", from_fn(move |_, _| Ok(record.clone())));
//! let badger = Badger::with_registry(registry);
//!
//! let badge = badger.issue("nmc:alice", &[b'a'; 32], &key).unwrap();
//! let json = badge.to_json().unwrap();
//! assert!(badger.verify_json(&json).unwrap());
//! ```
//!
//! ## Re-exports
//!
//! - `badger::core` - keys, signatures, badges, records
//! - `badger::resolve` - scheme registry, resolvers, HTTP transport

pub mod engine;
pub mod error;

// Re-export component crates
pub use badger_core as core;
pub use badger_resolve as resolve;

// Re-export main types for convenience
pub use engine::{Badger, BadgerConfig};
pub use error::{Error, Result};

// Re-export commonly used component types
pub use badger_core::{Badge, BadgeError, ErrorKind, Key, KeyPart, Locator, SchemaError};
pub use badger_resolve::{
    from_fn, HttpConfig, NameServiceConfig, NameServiceResolver, ResolveError, Resolver,
    SchemeRegistry,
};
