//! In-process mock of the REST backend for integration tests.
//!
//! ```rust,no_run
//! # async fn demo() {
//! use fdesk_http::testing::MockBackend;
//! use serde_json::json;
//!
//! let backend = MockBackend::start().await;
//! backend.on("GET", "/vehicles/", 200, json!({"count": 0, "results": []}));
//! let client = backend.client_with_token("secret");
//! # }
//! ```

use crate::client::ApiClient;
use crate::token::StaticToken;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

/// Path prefix the mock serves the API under, mirroring the real deployment.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
struct Route {
    method: String,
    path: String,
    status: u16,
    body: Option<Value>,
}

/// A request as the mock received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to [`API_PREFIX`].
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Value of a query parameter, if present.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == key).then(|| v.to_owned())
        })
    }
}

#[derive(Debug, Default)]
struct MockState {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A backend double listening on an ephemeral local port.
///
/// Unmatched requests get `404 {"detail": "Not found."}`. Later registrations for the
/// same method and path win.
#[derive(Debug, Clone)]
pub struct MockBackend {
    base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Binds `127.0.0.1:0` and serves in a background task.
    ///
    /// # Panics
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url: format!("http://{addr}{API_PREFIX}"), state }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answers `method path` with `status` and a JSON body.
    ///
    /// A `path` carrying a query string (`/parts/?page=2`) only matches that exact query
    /// and takes precedence over the bare path.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, status, Some(body))
    }

    /// Answers `method path` with `status` and no body.
    pub fn on_empty(&self, method: &str, path: &str, status: u16) -> &Self {
        self.push(method, path, status, None)
    }

    fn push(&self, method: &str, path: &str, status: u16, body: Option<Value>) -> &Self {
        self.state.routes.lock().push(Route {
            method: method.to_ascii_uppercase(),
            path: path.to_owned(),
            status,
            body,
        });
        self
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }

    /// Requests received for `method path`.
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
            .collect()
    }

    /// A client without credentials.
    ///
    /// # Panics
    /// Panics if the mock URL is rejected, which would be a bug in the mock.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::builder().base_url(&self.base_url).build().expect("mock client")
    }

    /// A client that sends `token` as bearer credentials.
    #[must_use]
    pub fn client_with_token(&self, token: &str) -> ApiClient {
        ApiClient::builder()
            .base_url(&self.base_url)
            .token_source(StaticToken::new(token))
            .build()
            .expect("mock client")
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path()).to_owned();
    let recorded = RecordedRequest {
        method: method.as_str().to_owned(),
        path: path.clone(),
        query: uri.query().map(ToOwned::to_owned),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().push(recorded);

    let full = uri.query().map(|query| format!("{path}?{query}"));
    let route = {
        let routes = state.routes.lock();
        let find = |wanted: &str| {
            routes.iter().rev().find(|r| r.method == method.as_str() && r.path == wanted).cloned()
        };
        full.as_deref().and_then(find).or_else(|| find(&path))
    };

    let Some(route) = route else {
        return (StatusCode::NOT_FOUND, axum::Json(json!({"detail": "Not found."}))).into_response();
    };

    let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match route.body {
        Some(body) => (status, axum::Json(body)).into_response(),
        None => status.into_response(),
    }
}
