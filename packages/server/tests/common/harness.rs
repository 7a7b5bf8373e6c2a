//! Test harness for driving the real router in-process.
//!
//! Builds the full middleware stack over an `InMemoryStore` and sends
//! requests with `tower::ServiceExt::oneshot`, so no Postgres is needed.
//! `send_request` is shared with the Postgres harness.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use news_core::common::{AuthorId, Role};
use news_core::domains::auth::JwtService;
use news_core::kernel::{InMemoryStore, ServerDeps};
use news_core::server::build_app;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `error` field of an error response body
    pub fn error(&self) -> &str {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

pub struct TestHarness {
    pub app: Router,
    pub store: Arc<InMemoryStore>,
    pub jwt_service: Arc<JwtService>,
}

impl TestHarness {
    pub fn new(store: InMemoryStore) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let store = Arc::new(store);
        let jwt_service = Arc::new(JwtService::new("test_secret", "test_issuer".to_string()));
        let deps = ServerDeps::new(
            store.clone(),
            store.clone(),
            store.clone(),
            jwt_service.clone(),
        );

        Self {
            app: build_app(deps, &[]),
            store,
            jwt_service,
        }
    }

    /// Token for the fixture author called `username`
    ///
    /// `roles` only land in the claims; the server uses the stored roles. An
    /// unknown name gets a token for an author id that does not exist.
    pub fn token(&self, username: &str, roles: &[Role]) -> String {
        let author_id = self
            .store
            .author_id_by_name(username)
            .unwrap_or(AuthorId::from_i64(0));

        self.jwt_service
            .create_token(author_id, username, roles)
            .expect("Failed to create test token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        send_request(&self.app, method, uri, token, body).await
    }

    /// Send as `username` holding `roles`
    pub async fn send_as(
        &self,
        username: &str,
        roles: &[Role],
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let token = self.token(username, roles);
        self.send(method, uri, Some(&token), body).await
    }
}

/// Run one request through `app` and decode the JSON body, if any
pub async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse { status, body }
}
