//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;

use cloudbox_api::{AppState, build_app};
use cloudbox_core::config::AppConfig;
use cloudbox_database::MemoryCatalog;
use cloudbox_storage::MemoryObjectStore;

/// Boundary used by [`TestApp::upload`].
const BOUNDARY: &str = "cloudbox-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Catalog behind the router, for direct inspection
    pub catalog: Arc<MemoryCatalog>,
    /// Object store behind the router
    pub store: Arc<MemoryObjectStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over in-memory backends
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        Self::with_config(config)
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let catalog = Arc::new(MemoryCatalog::new());
        let store = Arc::new(MemoryObjectStore::new());

        let state = AppState::from_parts(
            config.clone(),
            None,
            catalog.clone(),
            catalog.clone(),
            catalog.clone(),
            store.clone(),
        );
        let router = build_app(state, &config.server.cors);

        Self {
            router,
            catalog,
            store,
            config,
        }
    }

    /// Register a user and return the session cookie pair (`name=value`)
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@test.com"),
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Registration failed: {:?}",
            response.body
        );
        response
            .session_cookie(&self.config.auth.cookie_name)
            .expect("No session cookie in registration response")
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        let body = match body {
            Some(b) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_string(&b).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        self.send(req.body(body).expect("Failed to build request"))
            .await
    }

    /// Upload `data` as the multipart field `file` into `folder_path`
    pub async fn upload(
        &self,
        cookie: &str,
        folder_path: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let body = multipart_body("file", file_name, content_type, data);
        self.send_multipart(cookie, folder_path, body).await
    }

    /// Send a hand-built multipart body to the upload endpoint
    pub async fn send_multipart(&self, cookie: &str, folder_path: &str, body: Vec<u8>) -> TestResponse {
        let uri = if folder_path.is_empty() {
            "/api/upload".to_string()
        } else {
            format!("/api/upload?path={folder_path}")
        };

        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Run a request through the router and collect the response
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Build a multipart body with a single file part
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    if !content_type.is_empty() {
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Build a multipart body with a single text field and no file
pub fn multipart_text(field: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body (`Null` for non-JSON bodies)
    pub body: Value,
}

impl TestResponse {
    /// The `name=value` pair of a `Set-Cookie` header for `name`
    pub fn session_cookie(&self, name: &str) -> Option<String> {
        self.set_cookie(name)
            .and_then(|c| c.split(';').next().map(|pair| pair.trim().to_string()))
    }

    /// The full `Set-Cookie` header for `name`
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{name}=")))
            .map(String::from)
    }

    /// A string field of the JSON body, by JSON pointer
    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }
}
