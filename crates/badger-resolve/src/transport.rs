//! HTTP transport abstraction for resolvers.
//!
//! Resolvers only need a blocking GET and a blocking POST. The trait keeps the
//! network out of resolver logic so tests can substitute canned responses.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::config::{Credentials, HttpConfig};

/// Transport-level failure: connection refused, timeout, unreadable body.
///
/// A non-success status is not a transport failure; it arrives as an
/// [`HttpResponse`].
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A POST request body with its content type and optional basic credentials.
#[derive(Debug, Clone, Copy)]
pub struct PostRequest<'a> {
    pub content_type: &'a str,
    pub body: &'a str,
    pub credentials: Option<&'a Credentials>,
}

/// Blocking HTTP client.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait HttpClient: Send + Sync {
    /// GET `url`.
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    /// POST `request` to `url`.
    fn post(&self, url: &str, request: PostRequest<'_>) -> Result<HttpResponse, TransportError>;
}

/// `Authorization` header value for basic credentials.
pub fn basic_auth(credentials: &Credentials) -> String {
    let password = credentials.password.as_deref().unwrap_or("");
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", credentials.user, password))
    )
}

/// [`HttpClient`] backed by a `ureq` agent.
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new(config: &HttpConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();
        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl HttpClient for UreqClient {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        into_response(self.agent.get(url).call())
    }

    fn post(&self, url: &str, request: PostRequest<'_>) -> Result<HttpResponse, TransportError> {
        let mut req = self
            .agent
            .post(url)
            .set("Content-Type", request.content_type);
        if let Some(credentials) = request.credentials {
            req = req.set("Authorization", &basic_auth(credentials));
        }
        into_response(req.send_string(request.body))
    }
}

fn into_response(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<HttpResponse, TransportError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(TransportError(err.to_string())),
    };
    let status = response.status();
    let body = response
        .into_string()
        .map_err(|e| TransportError(e.to_string()))?;
    Ok(HttpResponse { status, body })
}
