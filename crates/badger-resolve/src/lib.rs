//! # Badger Resolve
//!
//! Turns identity locators into public keys.
//!
//! A [`SchemeRegistry`] maps locator prefixes to [`Resolver`]s. Resolvers
//! fetch a record document, and [`pipeline`] extracts the key and checks
//! badge signatures against it.
//!
//! ## Built-in schemes
//!
//! - `id:` - alias, rewritten to `nmc:id/<identifier>`
//! - `nmc:` - namecoin `name_show` over JSON-RPC
//! - `http:` / `https:` - the locator is fetched as a URL
//!
//! Network access goes through the [`HttpClient`] trait; [`UreqClient`] is
//! the blocking implementation.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod resolvers;
pub mod transport;

pub use config::{Credentials, HttpConfig, NameServiceConfig, DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
pub use error::{ResolveError, Result};
pub use pipeline::{resolve_key, verify_badge};
pub use registry::{ResolveChain, SchemeRegistry, MAX_ALIAS_DEPTH};
pub use resolvers::{
    from_fn, AliasResolver, ConfigLoader, DirectFetchResolver, FnResolver, NameServiceResolver,
    Resolver, NAMECOIN_ID_PREFIX,
};
pub use transport::{HttpClient, HttpResponse, PostRequest, TransportError, UreqClient};
