//! Configuration values injected into resolvers and the HTTP client.
//!
//! Nothing here reads files. Locating and parsing a name-service config file
//! is the embedding application's job.

use std::fmt;
use std::time::Duration;

/// Default namecoind JSON-RPC host.
pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";

/// Default namecoind JSON-RPC port.
pub const DEFAULT_RPC_PORT: u16 = 8336;

/// HTTP basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Where and how to reach the name service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameServiceConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,
    /// Basic credentials, if the endpoint requires them.
    pub credentials: Option<Credentials>,
}

impl NameServiceConfig {
    /// Endpoint at `url` with no credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: None,
        }
    }

    /// Endpoint on `host:port` over plain HTTP, as namecoind serves it.
    pub fn from_host_port(host: &str, port: u16) -> Self {
        Self::new(format!("http://{}:{}", host, port))
    }

    /// Attach basic credentials. An empty user means no credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, password: Option<String>) -> Self {
        let user = user.into();
        self.credentials = if user.is_empty() {
            None
        } else {
            Some(Credentials { user, password })
        };
        self
    }
}

impl Default for NameServiceConfig {
    fn default() -> Self {
        Self::from_host_port(DEFAULT_RPC_HOST, DEFAULT_RPC_PORT)
    }
}

/// Settings for the blocking HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout. Expiry is reported as a fetch error.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("badger/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = NameServiceConfig::default();
        assert_eq!(config.url, "http://127.0.0.1:8336");
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_empty_user_means_no_credentials() {
        let config = NameServiceConfig::default().with_credentials("", Some("pw".into()));
        assert!(config.credentials.is_none());

        let config = NameServiceConfig::default().with_credentials("rpc", None);
        assert_eq!(config.credentials.unwrap().user, "rpc");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            user: "rpc".into(),
            password: Some("hunter2".into()),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("rpc"));
        assert!(!debug.contains("hunter2"));
    }
}
