//! # Badger Testkit
//!
//! Testing utilities for Badger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Deterministic identities, a stub resolver, and a stub HTTP client
//! - **Generators**: Proptest strategies for passwords, keys, tokens, and locators
//! - **Vectors**: Malformed documents paired with the error kind they must produce
//!
//! ## Test Fixtures
//!
//! ```rust
//! use badger_resolve::{pipeline, SchemeRegistry};
//! use badger_testkit::fixtures::{alice, StubResolver};
//!
//! let alice = alice();
//! let stub = StubResolver::new();
//! stub.publish(&alice);
//!
//! let registry = SchemeRegistry::new();
//! registry.register("nmc:", stub.clone());
//!
//! let badge = alice.badge(b"hello");
//! assert!(pipeline::verify_badge(&registry, &badge).unwrap());
//! assert_eq!(stub.calls(), vec!["nmc:alice"]);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use badger_testkit::generators::{key, token};
//!
//! proptest! {
//!     #[test]
//!     fn signatures_verify(key in key(), token in token(256)) {
//!         let sig = badger_core::sign(&token, &key).unwrap();
//!         prop_assert!(badger_core::verify(&token, &sig, &key).unwrap());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{alice, bob, StubHttpClient, StubResolver, TestIdentity};
pub use vectors::{badge_vectors, envelope_vectors, record_vectors, Outcome};
