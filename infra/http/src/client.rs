use crate::error::{ApiError, ApiErrorExt};
use crate::query::ListQuery;
use crate::token::{NoToken, TokenSource};
use fdesk_domain::Page;
use fdesk_domain::config::ApiConfig;
use fdesk_domain::constants::{DEFAULT_API_URL, UNAUTHENTICATED_PATHS};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Upper bound on pages followed by [`ApiClient::list_all`].
pub const MAX_PAGES: usize = 500;

#[derive(Debug)]
pub struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

/// Shared REST client. Clones share the connection pool and the token source.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl Deref for ApiClient {
    type Target = ApiClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ApiClient {
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// API root every relative path is joined onto, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the API root. Absolute URLs (pagination links) pass through.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with(path, &ListQuery::default()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<T, ApiError> {
        let body = self.execute(Method::GET, path, query, None).await?;
        decode(body, path)
    }

    /// Fetches a collection, unwrapping `results` when the backend paginates.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<Vec<T>, ApiError> {
        let body = self.execute(Method::GET, path, query, None).await?;
        decode(body.map(unwrap_results), path)
    }

    /// Fetches one page of a collection. Unpaginated answers become a single page.
    pub async fn page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<Page<T>, ApiError> {
        let body = self.execute(Method::GET, path, query, None).await?;
        match body {
            Some(Value::Array(items)) => decode(Some(Value::Array(items)), path).map(Page::from_items),
            other => decode(other, path),
        }
    }

    /// Fetches every page of a collection by following `next` links until they run out.
    ///
    /// `query` applies to the first request only; later links already carry it.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<Vec<T>, ApiError> {
        let mut page: Page<T> = self.page(path, query).await?;
        let mut items = std::mem::take(&mut page.results);
        let mut fetched = 1;

        while let Some(next) = page.next.take() {
            if fetched == MAX_PAGES {
                warn!(%path, pages = fetched, "Stopped following pagination links");
                break;
            }
            page = self.page(&next, &ListQuery::default()).await?;
            items.append(&mut page.results);
            fetched += 1;
        }

        debug!(%path, pages = fetched, items = items.len(), "Collected all pages");
        Ok(items)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// Deletes a resource. Any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, &ListQuery::default(), None).await.map(drop)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(body).context("Failed to encode request body")?;
        let response = self.execute(method, path, &ListQuery::default(), Some(payload)).await?;
        decode(response, path)
    }

    /// Sends one request and returns the decoded JSON body, `None` when it is empty.
    ///
    /// Every failure is logged here and handed back unchanged.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &ListQuery,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url(path);
        let request = self.prepare(method.clone(), &url, query, body);

        debug!(%method, %url, "API request");
        let result = dispatch(request).await;
        if let Err(err) = &result {
            error!(%method, %url, error = %err, "API request failed");
        }
        result
    }

    fn prepare(
        &self,
        method: Method,
        url: &str,
        query: &ListQuery,
        body: Option<Value>,
    ) -> RequestBuilder {
        let mut request = self.http.request(method, url);

        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        if self.same_origin(url)
            && requires_auth(url)
            && let Some(token) = self.tokens.bearer_token()
        {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        request
    }

    /// Whether `url` points at the API host. Absolute links elsewhere never get the token.
    fn same_origin(&self, url: &str) -> bool {
        match (reqwest::Url::parse(url), reqwest::Url::parse(&self.base_url)) {
            (Ok(target), Ok(base)) => target.origin() == base.origin(),
            _ => false,
        }
    }
}

async fn dispatch(request: RequestBuilder) -> Result<Option<Value>, ApiError> {
    let response = request.send().await.context("Failed to reach the backend")?;
    let status = response.status();
    let bytes = response.bytes().await.context("Failed to read response body")?;

    if status == StatusCode::UNAUTHORIZED {
        let message = error_message(&bytes).unwrap_or(Cow::Borrowed("Authentication required"));
        return Err(ApiError::Unauthorized { message, context: None });
    }

    if !status.is_success() {
        let message = error_message(&bytes)
            .unwrap_or_else(|| Cow::Borrowed(status.canonical_reason().unwrap_or("Request failed")));
        return Err(ApiError::Status { status: status.as_u16(), message, context: None });
    }

    if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes).map(Some).context("Failed to decode response body")
}

fn decode<T: DeserializeOwned>(body: Option<Value>, path: &str) -> Result<T, ApiError> {
    serde_json::from_value(body.unwrap_or(Value::Null))
        .context(format!("Unexpected response shape from {path}"))
}

/// Returns the `results` field of a paginated envelope, or the body itself.
#[must_use]
pub fn unwrap_results(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or(Value::Null)
        },
        other => other,
    }
}

/// Whether a request to `url` should carry the bearer token.
#[must_use]
pub fn requires_auth(url: &str) -> bool {
    !UNAUTHENTICATED_PATHS.iter().any(|path| url.contains(path))
}

/// Pulls a human readable message out of an error body.
///
/// Understands `{"detail": ".."}`, `{"message": ".."}`, `{"error": ".."}` and field error
/// maps such as `{"plate_number": ["This field is required."]}`.
fn error_message(bytes: &[u8]) -> Option<Cow<'static, str>> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    if text.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return Some(Cow::Owned(truncate(text, 200)));
    };

    let Value::Object(map) = value else {
        return value.as_str().map(|s| Cow::Owned(s.to_owned()));
    };

    for key in ["detail", "message", "error"] {
        if let Some(Value::String(message)) = map.get(key) {
            return Some(Cow::Owned(message.clone()));
        }
    }

    let fields: Vec<String> = map
        .iter()
        .map(|(field, errors)| match errors {
            Value::Array(items) => {
                let joined: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                format!("{field}: {}", joined.join(" "))
            },
            Value::String(message) => format!("{field}: {message}"),
            other => format!("{field}: {other}"),
        })
        .collect();

    (!fields.is_empty()).then(|| Cow::Owned(fields.join("; ")))
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}

/// Builder for [`ApiClient`]. Unset values fall back to [`ApiConfig::default`].
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    config: ApiConfig,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl ApiClientBuilder {
    /// Takes base URL, timeout and user agent from `config`.
    #[must_use]
    pub fn config(mut self, config: &ApiConfig) -> Self {
        self.config = config.clone();
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn token_source(mut self, tokens: impl TokenSource + 'static) -> Self {
        self.tokens = Some(Arc::new(tokens));
        self
    }

    /// Validates the base URL and builds the connection pool.
    ///
    /// # Errors
    /// [`ApiError::InvalidConfiguration`] for a base URL that is not an absolute http(s) URL,
    /// [`ApiError::Transport`] when the TLS backend cannot be initialized.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let raw = self.config.base_url.trim();
        let raw = if raw.is_empty() { DEFAULT_API_URL } else { raw };

        let parsed = reqwest::Url::parse(raw).map_err(|err| ApiError::InvalidConfiguration {
            message: format!("invalid base url '{raw}': {err}").into(),
            context: None,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidConfiguration {
                message: format!("unsupported scheme '{}'", parsed.scheme()).into(),
                context: None,
            });
        }

        let mut http = reqwest::Client::builder().user_agent(self.config.user_agent.clone());
        if self.config.timeout_secs > 0 {
            http = http.timeout(Duration::from_secs(self.config.timeout_secs));
        }
        let http = http.build().context("Failed to build HTTP client")?;

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: raw.trim_end_matches('/').to_owned(),
                tokens: self.tokens.unwrap_or_else(|| Arc::new(NoToken)),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_results_prefers_envelope() {
        let body = json!({"count": 1, "next": null, "results": [{"id": 1}]});
        assert_eq!(unwrap_results(body), json!([{"id": 1}]));
    }

    #[test]
    fn test_unwrap_results_passes_plain_bodies_through() {
        assert_eq!(unwrap_results(json!([1, 2])), json!([1, 2]));
        assert_eq!(unwrap_results(json!({"id": 7})), json!({"id": 7}));
    }

    #[test]
    fn test_requires_auth_skips_login_and_register() {
        assert!(!requires_auth("http://h/api/v1/auth/login/"));
        assert!(!requires_auth("http://h/api/v1/auth/register/"));
        assert!(requires_auth("http://h/api/v1/auth/me/"));
        assert!(requires_auth("http://h/api/v1/vehicles/"));
    }

    #[test]
    fn test_token_stays_on_the_api_host() {
        let client = ApiClient::builder().base_url("http://localhost:8000/api/v1").build().unwrap();
        assert!(client.same_origin(&client.url("/vehicles/")));
        assert!(client.same_origin("http://localhost:8000/api/v1/vehicles/?page=2"));
        assert!(!client.same_origin("http://localhost:9000/api/v1/vehicles/?page=2"));
        assert!(!client.same_origin("https://localhost:8000/api/v1/vehicles/"));
        assert!(!client.same_origin("http://cdn.example.com/api/v1/vehicles/"));
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(br#"{"detail":"Not found."}"#).as_deref(), Some("Not found."));
        assert_eq!(
            error_message(br#"{"plate_number":["This field is required."]}"#).as_deref(),
            Some("plate_number: This field is required.")
        );
        assert_eq!(error_message(b"   ").as_deref(), None);
        assert_eq!(error_message(b"Bad Gateway").as_deref(), Some("Bad Gateway"));
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::builder().base_url("http://localhost:8000/api/v1/").build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/vehicles/"), "http://localhost:8000/api/v1/vehicles/");
        assert_eq!(client.url("vehicles/3/"), "http://localhost:8000/api/v1/vehicles/3/");
        assert_eq!(client.url("https://other/x/?page=2"), "https://other/x/?page=2");
    }

    #[test]
    fn test_builder_rejects_bad_urls() {
        let err = ApiClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfiguration { .. }));

        let err = ApiClient::builder().base_url("ftp://files/api").build().unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_blank_base_url_falls_back_to_default() {
        let client = ApiClient::builder().base_url("  ").build().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }
}
