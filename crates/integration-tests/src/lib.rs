//! Integration tests for Ventanas Perfectas.
//!
//! The tests drive the full axum router in-process via `tower::oneshot`,
//! with cookie propagation so one [`TestClient`] behaves like one customer
//! session. No network and no Gemini key are needed; assistant round trips
//! to the real backend are out of scope here.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ventanas-perfectas-integration-tests
//! ```

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;

use ventanas_perfectas_storefront::config::{GeminiConfig, StorefrontConfig};
use ventanas_perfectas_storefront::state::AppState;

/// Multipart boundary used by [`TestClient::post_multipart`].
const MULTIPART_BOUNDARY: &str = "integration-test-boundary";

/// Configuration for an in-process storefront with a dummy Gemini key.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        gemini: GeminiConfig {
            api_key: SecretString::from("AIzaIntegrationTestKey000"),
            config_model: "gemini-2.5-flash".to_string(),
            chat_model: "gemini-flash-latest".to_string(),
        },
        vat_rate: 0.21,
        session_ttl_minutes: 5,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// A decoded response: status plus JSON body (null for empty/non-JSON).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl TestResponse {
    /// The `error` field of a failure body.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// One customer session against an in-process storefront.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// A client with its own fresh storefront instance.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::new(test_config());
        Self::with_app(ventanas_perfectas_storefront::app(state))
    }

    /// A client sharing an existing router (for multi-session tests).
    #[must_use]
    pub fn with_app(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// The underlying router, to spawn a second session against the same
    /// storefront.
    #[must_use]
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// GET a path.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request_builder(uri)
            .method("GET")
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    /// POST a JSON body.
    pub async fn post_json(&mut self, uri: &str, body: serde_json::Value) -> TestResponse {
        let request = self
            .request_builder(uri)
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await
    }

    /// POST with an empty body.
    pub async fn post_empty(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request_builder(uri)
            .method("POST")
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    /// POST a multipart form with a single `file` field.
    ///
    /// Pass `None` to send a form without any file part.
    pub async fn post_multipart(
        &mut self,
        uri: &str,
        file: Option<(&str, &[u8])>,
    ) -> TestResponse {
        let mut body = Vec::new();
        if let Some((file_name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{MULTIPART_BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let request = self
            .request_builder(uri)
            .method("POST")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    fn request_builder(&self, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie.clone());
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("infallible service");

        // Adopt the session cookie the first time the server sets one.
        if let Some(set_cookie) = response.headers().get(SET_COOKIE)
            && let Ok(raw) = set_cookie.to_str()
            && let Some(pair) = raw.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        TestResponse { status, body }
    }
}

/// The default configurator state as a request body fragment.
#[must_use]
pub fn default_config_json() -> serde_json::Value {
    serde_json::to_value(ventanas_perfectas_core::WindowConfig::default()).expect("serialize")
}

/// A complete contact form.
#[must_use]
pub fn contact_json() -> serde_json::Value {
    serde_json::json!({
        "customerName": "Ana García",
        "email": "ana@example.com",
        "phone": "600123456",
        "deliveryAddress": "C/ Mayor 1, 28013 Madrid"
    })
}
