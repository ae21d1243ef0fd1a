//! Namecoin `name_show` over JSON-RPC.
//!
//! ## Envelope
//!
//! ```text
//! request:  {"method":"name_show","params":["<name>"]}
//! response: {"result":{"value":"<record>", ...},"error":null}
//!        |  {"result":null,"error":{"code":-4,"message":"..."}}
//! ```
//!
//! The name is the locator's identifier: `nmc:id/alice` looks up `id/alice`.

use std::sync::{Arc, Mutex, PoisonError};

use badger_core::{codec, BadgeError, Locator, SchemaError};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::Resolver;
use crate::config::NameServiceConfig;
use crate::error::{ResolveError, Result};
use crate::registry::ResolveChain;
use crate::transport::{HttpClient, HttpResponse, PostRequest};

const RESPONSE: &str = "name service response";
const RESULT: &str = "name service result";
const ERROR: &str = "name service error";

/// Produces the endpoint configuration on first use.
pub type ConfigLoader = Box<dyn Fn() -> Result<NameServiceConfig> + Send + Sync>;

#[derive(Serialize)]
struct NameShow<'a> {
    method: &'static str,
    params: [&'a str; 1],
}

/// Looks names up in a namecoind-compatible JSON-RPC endpoint.
///
/// The endpoint is either fixed at construction or loaded lazily, at most
/// once, by a [`ConfigLoader`]. A failed load is not cached.
pub struct NameServiceResolver {
    client: Arc<dyn HttpClient>,
    loader: Option<ConfigLoader>,
    endpoint: Mutex<Option<Arc<NameServiceConfig>>>,
}

impl NameServiceResolver {
    /// Resolver with a fixed endpoint.
    pub fn new(client: Arc<dyn HttpClient>, config: NameServiceConfig) -> Self {
        Self {
            client,
            loader: None,
            endpoint: Mutex::new(Some(Arc::new(config))),
        }
    }

    /// Resolver whose endpoint is produced by `loader` on the first lookup.
    pub fn deferred<F>(client: Arc<dyn HttpClient>, loader: F) -> Self
    where
        F: Fn() -> Result<NameServiceConfig> + Send + Sync + 'static,
    {
        Self {
            client,
            loader: Some(Box::new(loader)),
            endpoint: Mutex::new(None),
        }
    }

    /// The endpoint configuration, loading it if needed.
    pub fn endpoint(&self) -> Result<Arc<NameServiceConfig>> {
        // Held across the load so concurrent first lookups load once.
        let mut cached = self.endpoint.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = cached.as_ref() {
            return Ok(Arc::clone(config));
        }

        let loader = self
            .loader
            .as_ref()
            .ok_or_else(|| ResolveError::Config("no name service endpoint".into()))?;
        let config = Arc::new(loader()?);
        debug!(url = %config.url, "loaded name service endpoint");
        *cached = Some(Arc::clone(&config));
        Ok(config)
    }

    /// Look up `name` and return its value.
    pub fn name_show(&self, name: &str) -> Result<String> {
        let endpoint = self.endpoint()?;
        let body = serde_json::to_string(&NameShow {
            method: "name_show",
            params: [name],
        })
        .map_err(|e| BadgeError::Serialization(e.to_string()))?;

        let response = self
            .client
            .post(
                &endpoint.url,
                PostRequest {
                    content_type: "text/plain",
                    body: &body,
                    credentials: endpoint.credentials.as_ref(),
                },
            )
            .map_err(|e| ResolveError::Fetch {
                url: endpoint.url.clone(),
                reason: e.0,
            })?;

        debug!(name, status = response.status, "name_show");
        parse_envelope(name, &endpoint.url, response)
    }
}

impl Resolver for NameServiceResolver {
    fn resolve(&self, locator: &str, _chain: &ResolveChain<'_>) -> Result<String> {
        let locator = Locator::parse(locator).map_err(BadgeError::from)?;
        self.name_show(locator.identifier())
    }
}

/// Interpret a JSON-RPC reply.
///
/// namecoind reports RPC errors with a 500 status and a normal envelope, so
/// the envelope is read whatever the status. Only a non-JSON body with a
/// failure status is reported as a fetch error.
fn parse_envelope(name: &str, url: &str, response: HttpResponse) -> Result<String> {
    let envelope = match codec::parse_object(RESPONSE, &response.body) {
        Ok(envelope) => envelope,
        Err(BadgeError::Parse { .. }) if !response.is_success() => {
            return Err(ResolveError::HttpStatus {
                url: url.to_owned(),
                status: response.status,
            })
        }
        Err(e) => return Err(e.into()),
    };

    match envelope.get("result") {
        None => Err(SchemaError::Missing {
            document: RESPONSE,
            field: "result",
        }
        .into()),
        Some(Value::Object(result)) => Ok(codec::require_str(result, RESULT, "value")?.to_owned()),
        Some(Value::Null) => match envelope.get("error") {
            None | Some(Value::Null) => Err(ResolveError::NotFound(name.to_owned())),
            Some(Value::Object(error)) => {
                let message = codec::require_str(error, ERROR, "message")?;
                warn!(name, rpc_error = message, "name service returned an error");
                Err(ResolveError::Rpc(message.to_owned()))
            }
            Some(_) => Err(SchemaError::NotObject { document: ERROR }.into()),
        },
        Some(_) => Err(SchemaError::NotObject { document: RESULT }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::registry::SchemeRegistry;
    use crate::transport::TransportError;
    use badger_core::ErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[derive(Debug, Clone)]
    struct Posted {
        url: String,
        content_type: String,
        body: String,
        credentials: Option<Credentials>,
    }

    struct RpcStub {
        reply: HttpResponse,
        posts: Mutex<Vec<Posted>>,
    }

    impl RpcStub {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: HttpResponse::new(status, body),
                posts: Mutex::new(Vec::new()),
            })
        }

        fn posts(&self) -> Vec<Posted> {
            self.posts.lock().unwrap().clone()
        }
    }

    impl HttpClient for RpcStub {
        fn get(&self, _url: &str) -> std::result::Result<HttpResponse, TransportError> {
            panic!("name service never issues GET");
        }

        fn post(
            &self,
            url: &str,
            request: PostRequest<'_>,
        ) -> std::result::Result<HttpResponse, TransportError> {
            self.posts.lock().unwrap().push(Posted {
                url: url.to_owned(),
                content_type: request.content_type.to_owned(),
                body: request.body.to_owned(),
                credentials: request.credentials.cloned(),
            });
            Ok(self.reply.clone())
        }
    }

    fn resolver(stub: &Arc<RpcStub>) -> NameServiceResolver {
        NameServiceResolver::new(
            Arc::clone(stub) as Arc<dyn HttpClient>,
            NameServiceConfig::new("http://rpc.test:8336").with_credentials("rpc", Some("pw".into())),
        )
    }

    fn lookup(stub: &Arc<RpcStub>, locator: &str) -> Result<String> {
        let registry = SchemeRegistry::new();
        registry.register("nmc:", resolver(stub));
        registry.resolve(locator)
    }

    #[test]
    fn test_request_shape() {
        let stub = RpcStub::new(200, r#"{"result":{"name":"id/alice","value":"{\"dsa\":\"abc\"}"},"error":null,"id":null}"#);

        let record = lookup(&stub, "nmc:id/alice").unwrap();
        assert_eq!(record, r#"{"dsa":"abc"}"#);

        let posts = stub.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "http://rpc.test:8336");
        assert_eq!(posts[0].content_type, "text/plain");
        assert_eq!(
            posts[0].body,
            r#"{"method":"name_show","params":["id/alice"]}"#
        );
        assert_eq!(posts[0].credentials.as_ref().unwrap().user, "rpc");
    }

    #[test]
    fn test_not_found_when_both_null() {
        let stub = RpcStub::new(200, r#"{"result":null,"error":null}"#);
        let err = lookup(&stub, "nmc:nobody").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFoundError);
        assert!(matches!(err, ResolveError::NotFound(ref n) if n == "nobody"));
    }

    #[test]
    fn test_rpc_error_message_surfaces() {
        let stub = RpcStub::new(
            500,
            r#"{"result":null,"error":{"code":-4,"message":"failed to read from name DB"},"id":null}"#,
        );
        let err = lookup(&stub, "nmc:nobody").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RpcError);
        assert!(matches!(err, ResolveError::Rpc(ref m) if m == "failed to read from name DB"));
    }

    #[test]
    fn test_non_json_failure_status_is_fetch_error() {
        let stub = RpcStub::new(401, "");
        let err = lookup(&stub, "nmc:alice").unwrap_err();
        assert!(matches!(err, ResolveError::HttpStatus { status: 401, .. }));
    }

    #[test]
    fn test_envelope_error_granularity() {
        let stub = RpcStub::new(200, "<html>");
        assert_eq!(lookup(&stub, "nmc:a").unwrap_err().kind(), ErrorKind::ParseError);

        let cases: &[(&str, SchemaError)] = &[
            (
                "[1,2]",
                SchemaError::NotObject { document: RESPONSE },
            ),
            (
                r#"{"error":null}"#,
                SchemaError::Missing {
                    document: RESPONSE,
                    field: "result",
                },
            ),
            (
                r#"{"result":"x","error":null}"#,
                SchemaError::NotObject { document: RESULT },
            ),
            (
                r#"{"result":{"name":"a"},"error":null}"#,
                SchemaError::Missing {
                    document: RESULT,
                    field: "value",
                },
            ),
            (
                r#"{"result":{"value":{"dsa":"abc"}},"error":null}"#,
                SchemaError::NotString {
                    document: RESULT,
                    field: "value",
                },
            ),
            (
                r#"{"result":null,"error":"boom"}"#,
                SchemaError::NotObject { document: ERROR },
            ),
            (
                r#"{"result":null,"error":{"code":-4}}"#,
                SchemaError::Missing {
                    document: ERROR,
                    field: "message",
                },
            ),
        ];

        for (body, expected) in cases {
            let stub = RpcStub::new(200, body);
            match lookup(&stub, "nmc:a") {
                Err(ResolveError::Core(BadgeError::Schema(actual))) => {
                    assert_eq!(&actual, expected, "{}", body)
                }
                other => panic!("expected schema error for {}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_transport_failure() {
        struct Down;
        impl HttpClient for Down {
            fn get(&self, _url: &str) -> std::result::Result<HttpResponse, TransportError> {
                Err(TransportError("down".into()))
            }
            fn post(
                &self,
                _url: &str,
                _request: PostRequest<'_>,
            ) -> std::result::Result<HttpResponse, TransportError> {
                Err(TransportError("down".into()))
            }
        }

        let resolver = NameServiceResolver::new(Arc::new(Down), NameServiceConfig::default());
        let err = resolver.name_show("alice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FetchError);
    }

    #[test]
    fn test_deferred_endpoint_loads_once() {
        let stub = RpcStub::new(200, r#"{"result":{"value":"v"},"error":null}"#);
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);

        let resolver = Arc::new(NameServiceResolver::deferred(
            Arc::clone(&stub) as Arc<dyn HttpClient>,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(NameServiceConfig::new("http://lazy.test:1"))
            },
        ));
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || resolver.name_show("a").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "v");
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(stub.posts().iter().all(|p| p.url == "http://lazy.test:1"));
    }

    #[test]
    fn test_deferred_load_failure_is_retried() {
        let stub = RpcStub::new(200, r#"{"result":{"value":"v"},"error":null}"#);
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);

        let resolver = NameServiceResolver::deferred(
            Arc::clone(&stub) as Arc<dyn HttpClient>,
            move || {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ResolveError::Config("unreadable".into()))
                } else {
                    Ok(NameServiceConfig::default())
                }
            },
        );

        let err = resolver.name_show("a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert!(stub.posts().is_empty());

        assert_eq!(resolver.name_show("a").unwrap(), "v");
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }
}
