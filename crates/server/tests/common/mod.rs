//! Common test utilities for in-process API testing with mock converters.
//!
//! This module provides a test fixture that builds the full router around
//! an import service whose converters are `MockConverter`s, so the HTTP
//! surface can be exercised without a converter service.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use importer_core::testing::MockConverter;
use importer_core::{ImportOrchestrator, ImportService, ResultCache};

/// Re-export fixtures for test convenience
pub use importer_core::testing::fixtures;

/// Test fixture for in-process API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_inline_import() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/import", json!({
///         "importFile": fixtures::COMPOSE_DOCUMENT,
///     })).await;
///
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// The mock converters, in fan-out order
    pub converters: Vec<MockConverter>,
    /// The result cache behind the deferred path
    pub cache: Arc<ResultCache<Value>>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture where only the compose converter accepts.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let converters = test_config.converters.unwrap_or_else(|| {
            vec![
                MockConverter::declining("kubernetes", "missing kind -- can't validate"),
                MockConverter::declining("bundle", "invalid tar input"),
                MockConverter::accepting("compose", fixtures::flat_file_json("original")),
            ]
        });

        let orchestrator = ImportOrchestrator::new(
            fixtures::as_converters(converters.clone()),
            test_config.await_timeout,
        );
        let cache = Arc::new(ResultCache::new(
            test_config.cache_capacity,
            test_config.cache_ttl,
        ));
        let import_service = Arc::new(ImportService::new(orchestrator, Arc::clone(&cache)));

        let state = Arc::new(importer_server::state::AppState::new(import_service));
        let router = importer_server::api::create_router(state);

        Self {
            router,
            converters,
            cache,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, Body::empty(), None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let bytes = serde_json::to_vec(&body).unwrap();
        self.request("POST", path, Body::from(bytes), Some("application/json"))
            .await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            "POST",
            path,
            Body::from(body.to_string()),
            Some("application/json"),
        )
        .await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            request_builder = request_builder.header("Content-Type", content_type);
        }
        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Converters to fan out to; `None` uses the compose-only set
    pub converters: Option<Vec<MockConverter>>,
    /// Per-await bound of the orchestrator
    pub await_timeout: Duration,
    /// Result cache capacity
    pub cache_capacity: usize,
    /// Result cache time-to-live
    pub cache_ttl: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            converters: None,
            await_timeout: Duration::from_secs(5),
            cache_capacity: 8,
            cache_ttl: Duration::from_secs(30),
        }
    }
}

impl TestConfig {
    /// Use the given converters.
    pub fn with_converters(mut self, converters: Vec<MockConverter>) -> Self {
        self.converters = Some(converters);
        self
    }

    /// Use the given per-await bound.
    pub fn with_await_timeout(mut self, timeout: Duration) -> Self {
        self.await_timeout = timeout;
        self
    }

    /// Use the given cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Use the given cache time-to-live.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
