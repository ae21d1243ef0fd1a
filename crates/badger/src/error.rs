//! Error types for the Badger facade.

use badger_core::{BadgeError, ErrorKind};
use badger_resolve::ResolveError;
use thiserror::Error;

/// Errors that can occur during Badger operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Key, signature, or badge document error.
    #[error(transparent)]
    Badge(#[from] BadgeError),

    /// Locator resolution error.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A background verification task was cancelled before finishing.
    #[error("verification task cancelled")]
    Cancelled,
}

impl Error {
    /// The kind of the innermost error.
    ///
    /// [`Error::Cancelled`] has no kind of its own and reports
    /// [`ErrorKind::VerificationError`]: the badge could not be verified.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Badge(e) => e.kind(),
            Error::Resolve(e) => e.kind(),
            Error::Cancelled => ErrorKind::VerificationError,
        }
    }
}

/// Result type for Badger operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_passes_through_component_errors() {
        let err = Error::from(BadgeError::NotPrivate);
        assert_eq!(err.kind(), ErrorKind::NotPrivateError);

        let err = Error::from(ResolveError::NotFound("nmc:alice".into()));
        assert_eq!(err.kind(), ErrorKind::NotFoundError);
    }

    #[test]
    fn test_cancelled_reports_verification_error() {
        assert_eq!(Error::Cancelled.kind(), ErrorKind::VerificationError);
        assert_eq!(Error::Cancelled.to_string(), "verification task cancelled");
    }
}
