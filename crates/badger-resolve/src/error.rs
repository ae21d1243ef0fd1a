//! Error types for locator resolution.

use badger_core::{BadgeError, ErrorKind, SchemaError};
use thiserror::Error;

/// Errors that can occur while turning a locator into a key.
///
/// Errors from nested resolutions (an alias re-dispatching to the name
/// service) are returned unchanged, so the innermost cause is what the caller
/// sees.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No registered handler's scheme is a prefix of the locator.
    #[error("unsupported id scheme: {0}")]
    UnsupportedScheme(String),

    /// Transport-level failure (connection, timeout, unreadable body).
    #[error("fetching {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The name service reported an error.
    #[error("name service error: {0}")]
    Rpc(String),

    /// The name service has no value for the name.
    #[error("name not found: {0}")]
    NotFound(String),

    /// An alias resolved to another alias too many times.
    #[error("alias chain at {locator} exceeds maximum depth {max}")]
    AliasDepth { locator: String, max: usize },

    /// Name service endpoint configuration could not be obtained.
    #[error("name service configuration: {0}")]
    Config(String),

    /// Malformed JSON, wrong document shape, or a bad key in the record.
    #[error(transparent)]
    Core(#[from] BadgeError),
}

impl ResolveError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::UnsupportedScheme(_) => ErrorKind::UnsupportedScheme,
            ResolveError::Fetch { .. } | ResolveError::HttpStatus { .. } => ErrorKind::FetchError,
            ResolveError::Rpc(_) => ErrorKind::RpcError,
            ResolveError::NotFound(_) => ErrorKind::NotFoundError,
            ResolveError::AliasDepth { .. } => ErrorKind::AliasDepthExceeded,
            ResolveError::Config(_) => ErrorKind::ConfigError,
            ResolveError::Core(e) => e.kind(),
        }
    }
}

impl From<SchemaError> for ResolveError {
    fn from(e: SchemaError) -> Self {
        ResolveError::Core(BadgeError::Schema(e))
    }
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;
