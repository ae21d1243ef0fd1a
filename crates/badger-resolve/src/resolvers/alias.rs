use badger_core::{BadgeError, Locator};
use tracing::debug;

use super::Resolver;
use crate::error::Result;
use crate::registry::ResolveChain;

/// Namecoin's namespace for identity names.
pub const NAMECOIN_ID_PREFIX: &str = "nmc:id/";

/// Rewrites a locator to `<target prefix><identifier>` and re-dispatches.
///
/// `id:alice` becomes `nmc:id/alice` with [`AliasResolver::namecoin`].
#[derive(Debug, Clone)]
pub struct AliasResolver {
    target_prefix: String,
}

impl AliasResolver {
    pub fn new(target_prefix: impl Into<String>) -> Self {
        Self {
            target_prefix: target_prefix.into(),
        }
    }

    pub fn namecoin() -> Self {
        Self::new(NAMECOIN_ID_PREFIX)
    }

    /// The locator this alias stands for.
    pub fn rewrite(&self, locator: &str) -> Result<String> {
        let locator = Locator::parse(locator).map_err(BadgeError::from)?;
        Ok(format!("{}{}", self.target_prefix, locator.identifier()))
    }
}

impl Resolver for AliasResolver {
    fn resolve(&self, locator: &str, chain: &ResolveChain<'_>) -> Result<String> {
        let target = self.rewrite(locator)?;
        debug!(from = locator, to = %target, "alias");
        chain.redispatch(&target)
    }
}
