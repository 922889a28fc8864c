//! API clients for the festival chatbot backend
//!
//! [`ApiClient`] owns the base URL and timeouts and performs the HTTP
//! exchange; the service wrappers shape requests for each backend area.
//! Every request races a timer and fails with [`ApiError::Timeout`] if the
//! timer wins. Nothing is retried.

mod admin;
mod chat;
mod llm;
mod rag;

pub use admin::{AdminService, DEFAULT_CLEAR_HOURS, DEFAULT_SESSION_LIMIT};
pub use chat::ChatService;
pub use llm::{LlmService, ModelAction};
pub use rag::{upload_form, RagService, DEFAULT_RESULT_COUNT};

use std::future::Future;
use std::time::Duration;

use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::types::ErrorBody;

/// Errors from backend calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (DNS, CORS, offline).
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the allotted time.
    #[error("Request to {endpoint} timed out after {}s", after.as_secs())]
    Timeout { endpoint: String, after: Duration },

    /// Non-2xx response.
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request body could not be built.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

/// Per-class request timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Ordinary reads and writes.
    pub standard: Duration,
    /// Document uploads.
    pub upload: Duration,
    /// LLM text generation.
    pub generation: Duration,
    /// Loading, unloading or switching a model.
    pub model_ops: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            standard: Duration::from_secs(30),
            upload: Duration::from_secs(120),
            generation: Duration::from_secs(120),
            model_ops: Duration::from_secs(300),
        }
    }
}

impl Timeouts {
    pub fn with_standard(mut self, timeout: Duration) -> Self {
        self.standard = timeout;
        self
    }

    pub fn with_upload(mut self, timeout: Duration) -> Self {
        self.upload = timeout;
        self
    }

    pub fn with_generation(mut self, timeout: Duration) -> Self {
        self.generation = timeout;
        self
    }

    pub fn with_model_ops(mut self, timeout: Duration) -> Self {
        self.model_ops = timeout;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Self::Get => Request::get(url),
            Self::Post => Request::post(url),
            Self::Put => Request::put(url),
            Self::Delete => Request::delete(url),
        }
    }
}

/// HTTP client bound to one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    timeouts: Timeouts,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Absolute URL for an API path such as `/api/v1/health`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn chat(&self) -> ChatService {
        ChatService::new(self.clone())
    }

    pub fn admin(&self) -> AdminService {
        AdminService::new(self.clone())
    }

    pub fn llm(&self) -> LlmService {
        LlmService::new(self.clone())
    }

    pub fn rag(&self) -> RagService {
        RagService::new(self.clone())
    }

    /// GET a JSON resource
    pub(crate) async fn get_json<R>(&self, path: &str, timeout: Duration) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        self.exchange_json::<(), R>(Verb::Get, path, None, timeout)
            .await
    }

    /// GET a plain-text resource
    pub(crate) async fn get_text(&self, path: &str, timeout: Duration) -> Result<String, ApiError> {
        let url = self.url(path);
        let result = with_timeout(path, timeout, async {
            let resp = Verb::Get
                .builder(&url)
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let resp = ensure_success(resp).await?;
            resp.text()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()))
        })
        .await;
        log_failure(path, result)
    }

    pub(crate) async fn post_json<B, R>(
        &self,
        path: &str,
        body: Option<&B>,
        timeout: Duration,
    ) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.exchange_json(Verb::Post, path, body, timeout).await
    }

    pub(crate) async fn put_json<B, R>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.exchange_json(Verb::Put, path, Some(body), timeout)
            .await
    }

    pub(crate) async fn delete_json<B, R>(
        &self,
        path: &str,
        body: Option<&B>,
        timeout: Duration,
    ) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.exchange_json(Verb::Delete, path, body, timeout).await
    }

    /// POST a multipart form (document upload)
    pub(crate) async fn post_form<R>(
        &self,
        path: &str,
        form: web_sys::FormData,
        timeout: Duration,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.url(path);
        let result = with_timeout(path, timeout, async {
            let req = Verb::Post
                .builder(&url)
                .body(form)
                .map_err(|e| ApiError::Encode(e.to_string()))?;
            let resp = req
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            decode(resp).await
        })
        .await;
        log_failure(path, result)
    }

    async fn exchange_json<B, R>(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&B>,
        timeout: Duration,
    ) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        let result = with_timeout(path, timeout, async {
            let builder = verb.builder(&url);
            let resp = match body {
                Some(body) => builder
                    .header("Content-Type", "application/json")
                    .json(body)
                    .map_err(|e| ApiError::Encode(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;
            decode(resp).await
        })
        .await;
        log_failure(path, result)
    }
}

/// Race `fut` against a timer.
pub(crate) async fn with_timeout<T, F>(
    endpoint: &str,
    timeout: Duration,
    fut: F,
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let timer = TimeoutFuture::new(timeout_millis(timeout));
    futures::pin_mut!(fut);
    futures::pin_mut!(timer);

    match select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout {
            endpoint: endpoint.to_string(),
            after: timeout,
        }),
    }
}

/// Milliseconds for the browser timer, saturating at `u32::MAX`.
pub(crate) fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

/// Append `?key=value&...` with each value percent-encoded.
pub(crate) fn with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

/// Encode a single path segment (model names, document ids).
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

async fn ensure_success(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("HTTP {}", status));
    Err(ApiError::Status { status, message })
}

async fn decode<R: DeserializeOwned>(resp: Response) -> Result<R, ApiError> {
    let resp = ensure_success(resp).await?;
    resp.json::<R>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

fn log_failure<T>(endpoint: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        tracing::error!(endpoint, error = %e, "API request failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joining() {
        let client = ApiClient::new("https://festival.example/");
        assert_eq!(
            client.url("/api/v1/health"),
            "https://festival.example/api/v1/health"
        );

        let same_origin = ApiClient::new("");
        assert_eq!(same_origin.url("/api/v1/health"), "/api/v1/health");
    }

    #[test]
    fn test_default_timeouts() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.standard, Duration::from_secs(30));
        assert_eq!(timeouts.upload, Duration::from_secs(120));
        assert_eq!(timeouts.generation, Duration::from_secs(120));
        assert_eq!(timeouts.model_ops, Duration::from_secs(300));
    }

    #[test]
    fn test_timeouts_builder() {
        let timeouts = Timeouts::default()
            .with_standard(Duration::from_secs(5))
            .with_upload(Duration::from_secs(60))
            .with_generation(Duration::from_secs(90))
            .with_model_ops(Duration::from_secs(600));
        assert_eq!(timeouts.standard, Duration::from_secs(5));
        assert_eq!(timeouts.upload, Duration::from_secs(60));
        assert_eq!(timeouts.generation, Duration::from_secs(90));
        assert_eq!(timeouts.model_ops, Duration::from_secs(600));
    }

    #[test]
    fn test_timeout_millis_saturates() {
        assert_eq!(timeout_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }

    #[test]
    fn test_with_query_encodes_values() {
        assert_eq!(with_query("/a", &[]), "/a");
        assert_eq!(
            with_query("/a", &[("limit", 50.to_string())]),
            "/a?limit=50"
        );
        assert_eq!(
            with_query("/a", &[("q", "会場 はどこ".to_string()), ("n", "5".into())]),
            "/a?q=%E4%BC%9A%E5%A0%B4%20%E3%81%AF%E3%81%A9%E3%81%93&n=5"
        );
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("rinna/japanese-gpt"), "rinna%2Fjapanese-gpt");
        assert_eq!(segment("doc_1"), "doc_1");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Timeout {
            endpoint: "/api/v1/health".into(),
            after: Duration::from_secs(30),
        };
        assert_eq!(
            err.to_string(),
            "Request to /api/v1/health timed out after 30s"
        );

        let err = ApiError::Status {
            status: 404,
            message: "Session not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 404: Session not found"
        );
    }
}
