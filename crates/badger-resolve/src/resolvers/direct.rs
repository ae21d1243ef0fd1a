use std::sync::Arc;

use tracing::debug;

use super::Resolver;
use crate::error::{ResolveError, Result};
use crate::registry::ResolveChain;
use crate::transport::HttpClient;

/// Fetches the locator itself as a URL; the response body is the record.
pub struct DirectFetchResolver {
    client: Arc<dyn HttpClient>,
}

impl DirectFetchResolver {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl Resolver for DirectFetchResolver {
    fn resolve(&self, locator: &str, _chain: &ResolveChain<'_>) -> Result<String> {
        let response = self
            .client
            .get(locator)
            .map_err(|e| ResolveError::Fetch {
                url: locator.to_owned(),
                reason: e.0,
            })?;

        debug!(url = locator, status = response.status, "direct fetch");
        if !response.is_success() {
            return Err(ResolveError::HttpStatus {
                url: locator.to_owned(),
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemeRegistry;
    use crate::transport::{HttpResponse, PostRequest, TransportError};
    use badger_core::ErrorKind;
    use std::sync::Mutex;

    struct Canned {
        reply: std::result::Result<HttpResponse, TransportError>,
        urls: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(reply: std::result::Result<HttpResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                urls: Mutex::new(Vec::new()),
            })
        }
    }

    impl HttpClient for Canned {
        fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError> {
            self.urls.lock().unwrap().push(url.to_owned());
            self.reply.clone()
        }

        fn post(
            &self,
            _url: &str,
            _request: PostRequest<'_>,
        ) -> std::result::Result<HttpResponse, TransportError> {
            panic!("direct fetch never posts");
        }
    }

    fn registry(client: Arc<Canned>) -> SchemeRegistry {
        let registry = SchemeRegistry::new();
        registry.register("https:", DirectFetchResolver::new(client));
        registry
    }

    #[test]
    fn test_body_is_record() {
        let client = Canned::new(Ok(HttpResponse::new(200, r#"{"dsa":"abc"}"#)));
        let record = registry(Arc::clone(&client))
            .resolve("https://example.org/alice.json")
            .unwrap();

        assert_eq!(record, r#"{"dsa":"abc"}"#);
        assert_eq!(
            *client.urls.lock().unwrap(),
            vec!["https://example.org/alice.json"]
        );
    }

    #[test]
    fn test_non_success_status() {
        let client = Canned::new(Ok(HttpResponse::new(404, "not here")));
        let err = registry(client)
            .resolve("https://example.org/alice.json")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::FetchError);
        assert!(matches!(err, ResolveError::HttpStatus { status: 404, .. }));
    }

    #[test]
    fn test_transport_failure() {
        let client = Canned::new(Err(TransportError("connection refused".into())));
        let err = registry(client)
            .resolve("https://example.org/alice.json")
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::FetchError);
        assert!(err.to_string().contains("connection refused"));
    }
}
