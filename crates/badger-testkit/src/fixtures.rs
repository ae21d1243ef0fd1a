//! Test fixtures and helpers.
//!
//! Stand-ins for the network: a resolver serving records from memory and an
//! HTTP client replaying canned responses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use badger_core::{record, Badge, Key, KeyPart};
use badger_resolve::{
    HttpClient, HttpResponse, PostRequest, ResolveChain, ResolveError, Resolver, TransportError,
};

/// An identity: a locator and the key behind it.
pub struct TestIdentity {
    pub locator: String,
    pub password: String,
    pub key: Key,
}

impl TestIdentity {
    /// Identity with a password-derived key.
    pub fn new(locator: &str, password: &str) -> Self {
        Self {
            locator: locator.to_owned(),
            password: password.to_owned(),
            key: Key::generate(password).expect("test password within limit"),
        }
    }

    /// The identity record publishing this key.
    pub fn record(&self) -> String {
        record::to_record(&self.key).expect("record serializes")
    }

    /// Base64 private key, as the CLI prints it.
    pub fn private_key_text(&self) -> String {
        self.key
            .encode(KeyPart::Private)
            .expect("key has private half")
            .as_str()
            .to_owned()
    }

    /// A badge for `token` signed by this identity.
    pub fn badge(&self, token: &[u8]) -> Badge {
        Badge::issue(&self.locator, token, &self.key).expect("badge issues")
    }
}

/// Alice, `nmc:alice`, password `secret`.
pub fn alice() -> TestIdentity {
    TestIdentity::new("nmc:alice", "secret")
}

/// Bob, `nmc:bob`, password `hunter2`.
pub fn bob() -> TestIdentity {
    TestIdentity::new("nmc:bob", "hunter2")
}

#[derive(Default)]
struct StubState {
    records: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

/// Resolver serving records by exact locator.
///
/// Clones share state, so a clone registered in a registry can still be
/// inspected through the original.
#[derive(Clone, Default)]
pub struct StubResolver {
    state: Arc<StubState>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `record` for `locator`.
    pub fn insert(&self, locator: &str, record: &str) -> &Self {
        self.state
            .records
            .lock()
            .unwrap()
            .insert(locator.to_owned(), record.to_owned());
        self
    }

    /// Serve `identity`'s record under its own locator.
    pub fn publish(&self, identity: &TestIdentity) -> &Self {
        self.insert(&identity.locator, &identity.record())
    }

    /// Locators requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl Resolver for StubResolver {
    fn resolve(&self, locator: &str, _chain: &ResolveChain<'_>) -> Result<String, ResolveError> {
        self.state.calls.lock().unwrap().push(locator.to_owned());
        self.state
            .records
            .lock()
            .unwrap()
            .get(locator)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(locator.to_owned()))
    }
}

/// A request seen by [`StubHttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub content_type: Option<String>,
    pub body: Option<String>,
    pub user: Option<String>,
}

#[derive(Default)]
struct ClientState {
    routes: Mutex<HashMap<String, HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// HTTP client answering from a URL → response table.
///
/// Unrouted URLs fail as a transport error.
#[derive(Clone, Default)]
pub struct StubHttpClient {
    state: Arc<ClientState>,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests to `url` with `status` and `body`.
    pub fn route(&self, url: &str, status: u16, body: &str) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(url.to_owned(), HttpResponse::new(status, body));
        self
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Share as a trait object.
    pub fn shared(&self) -> Arc<dyn HttpClient> {
        Arc::new(self.clone())
    }

    fn answer(&self, request: RecordedRequest) -> Result<HttpResponse, TransportError> {
        let reply = self.state.routes.lock().unwrap().get(&request.url).cloned();
        let url = request.url.clone();
        self.state.requests.lock().unwrap().push(request);
        reply.ok_or_else(|| TransportError(format!("no route to {}", url)))
    }
}

impl HttpClient for StubHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.answer(RecordedRequest {
            method: "GET",
            url: url.to_owned(),
            content_type: None,
            body: None,
            user: None,
        })
    }

    fn post(&self, url: &str, request: PostRequest<'_>) -> Result<HttpResponse, TransportError> {
        self.answer(RecordedRequest {
            method: "POST",
            url: url.to_owned(),
            content_type: Some(request.content_type.to_owned()),
            body: Some(request.body.to_owned()),
            user: request.credentials.map(|c| c.user.clone()),
        })
    }
}

/// `name_show` reply carrying `value`.
pub fn rpc_value(value: &str) -> String {
    serde_json::json!({
        "result": { "name": "id/test", "value": value },
        "error": null,
        "id": null
    })
    .to_string()
}

/// `name_show` reply reporting an error.
pub fn rpc_error(code: i64, message: &str) -> String {
    serde_json::json!({
        "result": null,
        "error": { "code": code, "message": message },
        "id": null
    })
    .to_string()
}

/// `name_show` reply with neither result nor error.
pub fn rpc_not_found() -> String {
    r#"{"result":null,"error":null,"id":null}"#.to_owned()
}
