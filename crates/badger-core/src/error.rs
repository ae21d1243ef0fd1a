//! Error types for Badger core operations.

use std::fmt;

use thiserror::Error;

/// The kind of failure, independent of the detail carried by an error value.
///
/// Every error type in the Badger crates maps onto one of these kinds, so a
/// caller can branch on "name not found" versus "transport down" without
/// matching nested enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AllocationFailure,
    PasswordTooLong,
    RngError,
    KeyFormatError,
    NotPrivateError,
    Base64Error,
    ParseError,
    SchemaError,
    SerializationError,
    UnsupportedScheme,
    FetchError,
    RpcError,
    NotFoundError,
    AliasDepthExceeded,
    ConfigError,
    SigningError,
    VerificationError,
}

impl ErrorKind {
    /// Process exit status for command-line callers.
    ///
    /// Status 1 is reserved for "badge did not verify", so kinds start at 2.
    pub const fn exit_code(self) -> i32 {
        match self {
            ErrorKind::AllocationFailure => 2,
            ErrorKind::PasswordTooLong => 3,
            ErrorKind::RngError => 4,
            ErrorKind::KeyFormatError => 5,
            ErrorKind::NotPrivateError => 6,
            ErrorKind::Base64Error => 7,
            ErrorKind::ParseError => 8,
            ErrorKind::SchemaError => 9,
            ErrorKind::SerializationError => 10,
            ErrorKind::UnsupportedScheme => 11,
            ErrorKind::FetchError => 12,
            ErrorKind::RpcError => 13,
            ErrorKind::NotFoundError => 14,
            ErrorKind::AliasDepthExceeded => 15,
            ErrorKind::ConfigError => 16,
            ErrorKind::SigningError => 17,
            ErrorKind::VerificationError => 18,
        }
    }

    /// Short stable name, as printed by the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::AllocationFailure => "allocation failure",
            ErrorKind::PasswordTooLong => "password too long",
            ErrorKind::RngError => "rng error",
            ErrorKind::KeyFormatError => "key format error",
            ErrorKind::NotPrivateError => "not a private key",
            ErrorKind::Base64Error => "base64 error",
            ErrorKind::ParseError => "parse error",
            ErrorKind::SchemaError => "schema error",
            ErrorKind::SerializationError => "serialization error",
            ErrorKind::UnsupportedScheme => "unsupported scheme",
            ErrorKind::FetchError => "fetch error",
            ErrorKind::RpcError => "rpc error",
            ErrorKind::NotFoundError => "not found",
            ErrorKind::AliasDepthExceeded => "alias depth exceeded",
            ErrorKind::ConfigError => "config error",
            ErrorKind::SigningError => "signing error",
            ErrorKind::VerificationError => "verification error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrong shape of a JSON document (badge, record, or RPC envelope).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{document} is not a JSON object")]
    NotObject { document: &'static str },

    #[error("{document} missing {field} attribute")]
    Missing {
        document: &'static str,
        field: &'static str,
    },

    #[error("{document} {field} not a string")]
    NotString {
        document: &'static str,
        field: &'static str,
    },

    #[error("{document} {field} is empty")]
    Empty {
        document: &'static str,
        field: &'static str,
    },

    #[error("invalid locator {0:?}: expected scheme \":\" identifier")]
    InvalidLocator(String),
}

/// Errors from key, signature, badge and record operations.
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("out of memory: {0}")]
    Allocation(String),

    #[error("password cannot be more than {max} bytes (got {len})")]
    PasswordTooLong { len: usize, max: usize },

    #[error("password stream failed: {0}")]
    Rng(String),

    #[error("malformed key: {0}")]
    KeyFormat(String),

    #[error("key has no private half")]
    NotPrivate,

    #[error("invalid base64 in {field}: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("failed to load {document} JSON: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("malformed signature: {0}")]
    Verification(String),
}

impl BadgeError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BadgeError::Allocation(_) => ErrorKind::AllocationFailure,
            BadgeError::PasswordTooLong { .. } => ErrorKind::PasswordTooLong,
            BadgeError::Rng(_) => ErrorKind::RngError,
            BadgeError::KeyFormat(_) => ErrorKind::KeyFormatError,
            BadgeError::NotPrivate => ErrorKind::NotPrivateError,
            BadgeError::Base64 { .. } => ErrorKind::Base64Error,
            BadgeError::Parse { .. } => ErrorKind::ParseError,
            BadgeError::Schema(_) => ErrorKind::SchemaError,
            BadgeError::Serialization(_) => ErrorKind::SerializationError,
            BadgeError::Signing(_) => ErrorKind::SigningError,
            BadgeError::Verification(_) => ErrorKind::VerificationError,
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, BadgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let kinds = [
            ErrorKind::AllocationFailure,
            ErrorKind::PasswordTooLong,
            ErrorKind::RngError,
            ErrorKind::KeyFormatError,
            ErrorKind::NotPrivateError,
            ErrorKind::Base64Error,
            ErrorKind::ParseError,
            ErrorKind::SchemaError,
            ErrorKind::SerializationError,
            ErrorKind::UnsupportedScheme,
            ErrorKind::FetchError,
            ErrorKind::RpcError,
            ErrorKind::NotFoundError,
            ErrorKind::AliasDepthExceeded,
            ErrorKind::ConfigError,
            ErrorKind::SigningError,
            ErrorKind::VerificationError,
        ];

        let mut codes: Vec<i32> = kinds.iter().map(|k| k.exit_code()).collect();
        assert!(codes.iter().all(|c| *c > 1));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_schema_error_messages() {
        let missing = SchemaError::Missing {
            document: "badge",
            field: "token",
        };
        assert_eq!(missing.to_string(), "badge missing token attribute");

        let err = BadgeError::from(SchemaError::NotString {
            document: "record",
            field: "dsa",
        });
        assert_eq!(err.kind(), ErrorKind::SchemaError);
        assert_eq!(err.to_string(), "record dsa not a string");
    }
}
