//! # Authenticated HTTP client
//!
//! [`HttpClient`] is the only place that knows about status codes, bearer tokens
//! and JSON bodies. Services hand it a path and an optional body and get back a
//! parsed [`serde_json::Value`] or an [`ApiError`].
//!
//! The network itself sits behind the [`Transport`] trait so the client can run
//! against reqwest in production and an in-memory transport in tests.

mod params;
mod reqwest_transport;

pub use params::QueryParams;
pub use reqwest_transport::ReqwestTransport;

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::ClientConfig,
    errors::{ApiError, ApiResult},
};

/// HTTP verbs used by the admin API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl MultipartPart {
    pub fn text(name: impl Into<String>, value: impl ToString) -> Self {
        MultipartPart::Text {
            name: name.into(),
            value: value.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<MultipartPart>),
}

/// A fully described request, ready for a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `/products/3`
    pub path: String,
    pub query: QueryParams,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `path?query` as it would appear on the wire
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }
}

/// Raw status and body returned by a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// Supplies the bearer token attached to every request, if any.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// A token slot that can be filled on login and cleared on logout
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }
}

impl TokenProvider for SharedToken {
    fn token(&self) -> Option<String> {
        self.inner.read().ok().and_then(|slot| slot.clone())
    }
}

/// Authenticated JSON client shared by every resource service
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { transport, tokens }
    }

    /// Build a client backed by reqwest from the given configuration
    pub fn from_config(config: ClientConfig, tokens: Arc<dyn TokenProvider>) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), tokens))
    }

    pub async fn get(&self, path: &str, query: QueryParams) -> ApiResult<Value> {
        self.execute(ApiRequest::new(Method::Get, path).with_query(query))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.execute(ApiRequest::new(Method::Post, path).with_body(json_body(body)?))
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.execute(ApiRequest::new(Method::Put, path).with_body(json_body(body)?))
            .await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.execute(ApiRequest::new(Method::Patch, path).with_body(json_body(body)?))
            .await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.execute(ApiRequest::new(Method::Delete, path)).await
    }

    /// POST a multipart form; no JSON content type is set
    pub async fn post_multipart(&self, path: &str, parts: Vec<MultipartPart>) -> ApiResult<Value> {
        self.execute(ApiRequest::new(Method::Post, path).with_body(RequestBody::Multipart(parts)))
            .await
    }

    /// GET a binary body.
    ///
    /// The bearer header is attached here directly rather than through
    /// [`HttpClient::execute`], and the body is returned untouched.
    pub async fn download(&self, path: &str, query: QueryParams) -> ApiResult<Vec<u8>> {
        let mut request = ApiRequest::new(Method::Get, path)
            .with_query(query)
            .with_header("Accept", "application/octet-stream");
        if let Some(token) = self.tokens.token() {
            request = request.with_header("Authorization", format!("Bearer {token}"));
        }

        crate::log_request!("{} {} (download)", request.method, request.target());
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        Ok(response.body)
    }

    async fn execute(&self, mut request: ApiRequest) -> ApiResult<Value> {
        request = request.with_header("Accept", "application/json");
        if let Some(token) = self.tokens.token() {
            request = request.with_header("Authorization", format!("Bearer {token}"));
        }

        crate::log_request!("{} {}", request.method, request.target());
        let response = self.transport.send(request).await?;
        crate::debug_log!("[HTTP] status {}", response.status);

        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        // Non-JSON success bodies decode as null; the envelope layer turns that
        // into an empty list or an invalid response for the resource.
        Ok(serde_json::from_slice(&response.body).unwrap_or_else(|_e| {
            crate::warn_log!("[HTTP] success body is not JSON: {}", _e);
            Value::Null
        }))
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<RequestBody> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Transport(format!("Failed to encode request body: {e}")))
}

/// Turns a non-2xx response into an error, preferring the server's `message`
fn error_from_response(response: &ApiResponse) -> ApiError {
    let message = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        });
    ApiError::http(response.status, message)
}
