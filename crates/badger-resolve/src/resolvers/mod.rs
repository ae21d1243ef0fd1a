//! Resolvers turn a locator into a record document.

mod alias;
mod direct;
mod name_service;

pub use alias::{AliasResolver, NAMECOIN_ID_PREFIX};
pub use direct::DirectFetchResolver;
pub use name_service::{ConfigLoader, NameServiceResolver};

use crate::error::Result;
use crate::registry::ResolveChain;

/// Strategy for fetching the record behind a locator.
///
/// The locator is passed whole, scheme included. Implementations must be
/// thread-safe (Send + Sync); the registry may call them concurrently.
pub trait Resolver: Send + Sync {
    /// Fetch the record document for `locator`.
    ///
    /// `chain` allows re-dispatching another locator through the registry
    /// that invoked this resolver.
    fn resolve(&self, locator: &str, chain: &ResolveChain<'_>) -> Result<String>;
}

/// Resolver wrapping a closure.
pub struct FnResolver<F> {
    f: F,
}

/// Build a resolver from a closure.
pub fn from_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&str, &ResolveChain<'_>) -> Result<String> + Send + Sync,
{
    FnResolver { f }
}

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&str, &ResolveChain<'_>) -> Result<String> + Send + Sync,
{
    fn resolve(&self, locator: &str, chain: &ResolveChain<'_>) -> Result<String> {
        (self.f)(locator, chain)
    }
}
