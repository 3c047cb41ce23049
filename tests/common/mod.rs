#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use bakery_admin::{
    errors::ApiResult,
    http::{ApiRequest, ApiResponse, HttpClient, Method, Transport},
    queries::AdminApi,
    query::{QueryClient, ToastQueue},
};
use serde_json::Value;

/// In-memory backend. Routes are matched on method and path; the query string
/// is recorded but ignored for matching.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), (u16, String)>>,
    requests: Mutex<Vec<ApiRequest>>,
    delay: Mutex<Option<Duration>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    /// Hold every response this long, so concurrent reads overlap
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self, method: Method, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let route = self.routes.lock().unwrap().get(&key).cloned();
        let (status, body) =
            route.unwrap_or_else(|| (404, r#"{"message":"Not found"}"#.to_string()));
        Ok(ApiResponse {
            status,
            body: body.into_bytes(),
        })
    }
}

pub struct Harness {
    pub api: AdminApi,
    pub transport: Arc<MockTransport>,
    pub toasts: ToastQueue,
}

pub fn harness() -> Harness {
    init_tracing();
    let transport = MockTransport::new();
    let toasts = ToastQueue::new();
    let http = HttpClient::new(
        transport.clone(),
        Arc::new(|| Some("test-token".to_string())),
    );
    let client = QueryClient::new(Arc::new(toasts.clone()));
    Harness {
        api: AdminApi::new(http, client),
        transport,
        toasts,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}
