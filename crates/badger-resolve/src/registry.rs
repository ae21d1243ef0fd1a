//! Scheme registry: maps locator prefixes to resolvers.
//!
//! Handlers are tried in registration order and the first whose scheme is a
//! prefix of the locator wins. Registration may happen while other threads
//! are resolving; a resolver is cloned out of the lock before it runs, so a
//! slow fetch never blocks registration.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::config::NameServiceConfig;
use crate::error::{ResolveError, Result};
use crate::resolvers::{AliasResolver, DirectFetchResolver, NameServiceResolver, Resolver};
use crate::transport::HttpClient;

/// Maximum number of alias re-dispatches in one resolution.
pub const MAX_ALIAS_DEPTH: usize = 1;

struct SchemeHandler {
    scheme: String,
    resolver: Arc<dyn Resolver>,
}

/// Ordered list of scheme handlers.
pub struct SchemeRegistry {
    handlers: RwLock<Vec<SchemeHandler>>,
}

impl SchemeRegistry {
    /// An empty registry. Every locator is unsupported until a handler is
    /// registered.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// A registry with the four built-in schemes:
    ///
    /// | Prefix    | Resolver                       |
    /// |-----------|--------------------------------|
    /// | `id:`     | alias to `nmc:id/<identifier>` |
    /// | `nmc:`    | namecoin `name_show`           |
    /// | `http:`   | direct fetch                   |
    /// | `https:`  | direct fetch                   |
    pub fn with_defaults(client: Arc<dyn HttpClient>, name_service: NameServiceResolver) -> Self {
        let registry = Self::new();
        let direct: Arc<dyn Resolver> = Arc::new(DirectFetchResolver::new(client));

        registry.register("id:", AliasResolver::namecoin());
        registry.register("nmc:", name_service);
        registry.register_arc("http:", Arc::clone(&direct));
        registry.register_arc("https:", direct);
        registry
    }

    /// Built-in schemes with the name service at a fixed endpoint.
    pub fn with_endpoint(client: Arc<dyn HttpClient>, config: NameServiceConfig) -> Self {
        let name_service = NameServiceResolver::new(Arc::clone(&client), config);
        Self::with_defaults(client, name_service)
    }

    /// Append a handler. Earlier registrations take precedence for
    /// overlapping prefixes; duplicates are allowed and the later one is
    /// shadowed.
    pub fn register(&self, scheme: impl Into<String>, resolver: impl Resolver + 'static) {
        self.register_arc(scheme, Arc::new(resolver));
    }

    /// Append a handler sharing an existing resolver.
    pub fn register_arc(&self, scheme: impl Into<String>, resolver: Arc<dyn Resolver>) {
        let scheme = scheme.into();
        debug!(scheme = %scheme, "registering scheme handler");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SchemeHandler { scheme, resolver });
    }

    /// Registered prefixes in match order.
    pub fn schemes(&self) -> Vec<String> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|h| h.scheme.clone())
            .collect()
    }

    /// The first handler whose prefix matches `locator`.
    pub fn dispatch(&self, locator: &str) -> Option<(String, Arc<dyn Resolver>)> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|h| locator.starts_with(h.scheme.as_str()))
            .map(|h| (h.scheme.clone(), Arc::clone(&h.resolver)))
    }

    /// Resolve `locator` to its record document.
    pub fn resolve(&self, locator: &str) -> Result<String> {
        self.resolve_at(locator, 0)
    }

    fn resolve_at(&self, locator: &str, depth: usize) -> Result<String> {
        let (scheme, resolver) = self
            .dispatch(locator)
            .ok_or_else(|| ResolveError::UnsupportedScheme(locator.to_owned()))?;

        debug!(locator, scheme = %scheme, depth, "dispatching locator");
        resolver.resolve(
            locator,
            &ResolveChain {
                registry: self,
                depth,
            },
        )
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Context handed to a resolver for re-dispatching through the registry.
pub struct ResolveChain<'a> {
    registry: &'a SchemeRegistry,
    depth: usize,
}

impl ResolveChain<'_> {
    /// How many re-dispatches preceded this resolution.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolve `locator` through the same registry, one level deeper.
    ///
    /// Fails with [`ResolveError::AliasDepth`] once [`MAX_ALIAS_DEPTH`]
    /// re-dispatches have already happened.
    pub fn redispatch(&self, locator: &str) -> Result<String> {
        if self.depth >= MAX_ALIAS_DEPTH {
            return Err(ResolveError::AliasDepth {
                locator: locator.to_owned(),
                max: MAX_ALIAS_DEPTH,
            });
        }
        self.registry.resolve_at(locator, self.depth + 1)
    }
}
