//! The Badger engine: issuing badges and verifying them through the scheme
//! registry.

use std::sync::Arc;

use badger_core::{Badge, Key, Locator};
use badger_resolve::{
    pipeline, HttpClient, HttpConfig, NameServiceConfig, Resolver, SchemeRegistry, UreqClient,
};
use tracing::debug;

use crate::error::{Error, Result};

/// Configuration for the engine's default registry.
#[derive(Debug, Clone, Default)]
pub struct BadgerConfig {
    /// HTTP client settings, shared by direct fetch and the name service.
    pub http: HttpConfig,
    /// Name service endpoint.
    pub name_service: NameServiceConfig,
}

/// Entry point for issuing and verifying badges.
///
/// Cheap to clone; clones share one registry.
#[derive(Clone)]
pub struct Badger {
    registry: Arc<SchemeRegistry>,
}

impl Badger {
    /// Engine with the built-in schemes, reaching the network through `ureq`.
    pub fn new(config: BadgerConfig) -> Self {
        let client: Arc<dyn HttpClient> = Arc::new(UreqClient::new(&config.http));
        Self::with_registry(SchemeRegistry::with_endpoint(client, config.name_service))
    }

    /// Engine over a caller-assembled registry.
    pub fn with_registry(registry: SchemeRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// Register an additional scheme handler.
    pub fn register(&self, scheme: impl Into<String>, resolver: impl Resolver + 'static) {
        self.registry.register(scheme, resolver);
    }

    /// Sign `token` with `key` and assemble a badge for `locator`.
    pub fn issue(&self, locator: &str, token: &[u8], key: &Key) -> Result<Badge> {
        let badge = Badge::issue(locator, token, key)?;
        debug!(locator, key = %key.fingerprint(), "issued badge");
        Ok(badge)
    }

    /// Resolve the public key published for `locator`.
    pub fn resolve_key(&self, locator: &str) -> Result<Key> {
        let locator = Locator::parse(locator).map_err(badger_core::BadgeError::from)?;
        Ok(pipeline::resolve_key(&self.registry, &locator)?)
    }

    /// Verify `badge` against the key published for its locator.
    pub fn verify(&self, badge: &Badge) -> Result<bool> {
        Ok(pipeline::verify_badge(&self.registry, badge)?)
    }

    /// Parse a badge JSON document and verify it.
    pub fn verify_json(&self, json: &str) -> Result<bool> {
        let badge = Badge::from_json(json)?;
        self.verify(&badge)
    }

    /// Verify on tokio's blocking pool.
    ///
    /// Resolution performs blocking network I/O; this keeps it off async
    /// worker threads. A panic inside the task is resumed on the caller.
    pub async fn verify_async(&self, badge: Badge) -> Result<bool> {
        let registry = Arc::clone(&self.registry);
        let task =
            tokio::task::spawn_blocking(move || pipeline::verify_badge(&registry, &badge));

        match task.await {
            Ok(result) => Ok(result?),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(Error::Cancelled),
        }
    }
}

impl Default for Badger {
    fn default() -> Self {
        Self::new(BadgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badger_core::{record, ErrorKind};
    use badger_resolve::from_fn;

    fn engine_for(key: &Key) -> Badger {
        let record = record::to_record(key).unwrap();
        let registry = SchemeRegistry::new();
        registry.register("nmc:", from_fn(move |_, _| Ok(record.clone())));
        Badger::with_registry(registry)
    }

    #[test]
    fn test_issue_and_verify() {
        let key = Key::generate("secret").unwrap();
        let badger = engine_for(&key);

        let badge = badger.issue("nmc:alice", b"token", &key).unwrap();
        assert!(badger.verify(&badge).unwrap());
        assert!(badger.verify_json(&badge.to_json().unwrap()).unwrap());
    }

    #[test]
    fn test_issue_requires_private_key() {
        let key = Key::generate("secret").unwrap();
        let badger = engine_for(&key);

        let err = badger.issue("nmc:alice", b"token", &key.public()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotPrivateError);
    }

    #[test]
    fn test_resolve_key() {
        let key = Key::generate("secret").unwrap();
        let badger = engine_for(&key);

        let resolved = badger.resolve_key("nmc:alice").unwrap();
        assert_eq!(resolved.fingerprint(), key.fingerprint());

        let err = badger.resolve_key("alice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaError);

        let err = badger.resolve_key("ftp:alice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);
    }

    #[test]
    fn test_default_engine_schemes() {
        let badger = Badger::default();
        assert_eq!(
            badger.registry().schemes(),
            vec!["id:", "nmc:", "http:", "https:"]
        );
    }

    #[test]
    fn test_register_on_shared_engine() {
        let key = Key::generate("secret").unwrap();
        let record = record::to_record(&key).unwrap();
        let badger = Badger::with_registry(SchemeRegistry::new());
        let clone = badger.clone();

        clone.register("test:", from_fn(move |_, _| Ok(record.clone())));

        let badge = badger.issue("test:alice", b"t", &key).unwrap();
        assert!(badger.verify(&badge).unwrap());
    }

    #[tokio::test]
    async fn test_verify_async() {
        let key = Key::generate("secret").unwrap();
        let badger = engine_for(&key);

        let badge = badger.issue("nmc:alice", b"token", &key).unwrap();
        assert!(badger.verify_async(badge).await.unwrap());

        let forged = Badge::issue("nmc:alice", b"token", &Key::random()).unwrap();
        assert!(!badger.verify_async(forged).await.unwrap());
    }
}
