//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use screener_api::{AppState, build_app};
use screener_auth::Claims;
use screener_core::config::AppConfig;
use screener_core::traits::{Clock, ManualClock};
use screener_database::MemoryPressLinkStore;

/// Shared secret for test bearer tokens.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory store behind the router
    pub store: Arc<MemoryPressLinkStore>,
    /// Clock driving link validity
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.press.public_base_url = "https://screener.test".to_string();

        let store = Arc::new(MemoryPressLinkStore::new());
        let clock = Arc::new(ManualClock::starting_now());
        let state = AppState::new(config.clone(), store.clone(), clock.clone());

        Self {
            router: build_app(state),
            store,
            clock,
            config,
        }
    }

    /// Bearer token for an admin identity.
    pub fn admin_token(&self) -> String {
        self.token_for("ops.developer@studio.test")
    }

    /// Bearer token for an arbitrary email.
    pub fn token_for(&self, email: &str) -> String {
        let claims = Claims {
            sub: format!("user-{email}"),
            email: Some(email.to_string()),
            exp: Utc::now().timestamp() + 3600,
            iat: Some(Utc::now().timestamp()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    /// Send a JSON request through the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[])
            .await
    }

    /// Send a JSON request with extra headers.
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if body.is_some() {
            req = req.header("Content-Type", "application/json");
        }
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a press link as admin and return the `data` payload.
    pub async fn create_link(&self, password: Option<&str>) -> Value {
        let expires_at = (self.clock.now() + chrono::Duration::days(1)).timestamp_millis();
        let mut body = serde_json::json!({
            "videoId": "vid-2001",
            "movieId": 2001,
            "movieTitle": "The Long Field",
            "recipientEmail": "critic@paper.test",
            "recipientName": "Jo Critic",
            "organization": "The Paper",
            "expiresAt": expires_at,
        });
        if let Some(password) = password {
            body["password"] = Value::from(password);
        }

        let response = self
            .request("POST", "/api/press/admin", Some(body), Some(&self.admin_token()))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
