//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use docvault_api::{AppState, build_app};
use docvault_cache::TtlCache;
use docvault_core::config::{AppConfig, DatabaseBackend};
use docvault_database::Repositories;
use docvault_database::memory::MemoryDatabase;

pub const ADMIN_TOKEN: &str = "admin-registration-secret";
pub const PASSWORD: &str = "Str0ng!Pass";

const BOUNDARY: &str = "docvault-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing tables for direct inspection
    pub db: MemoryDatabase,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.auth.admin_token = Some(ADMIN_TOKEN.to_string());
        config.auth.hashing.memory_kib = 64;
        config.auth.hashing.iterations = 1;
        config.server.max_upload_bytes = 1024 * 1024;

        let db = MemoryDatabase::new();
        let cache = Arc::new(TtlCache::new(config.cache.lifespan()));
        let state = AppState::new(config, Repositories::memory(db.clone()), cache)
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            db,
        }
    }

    /// Register a regular user with [`PASSWORD`]
    pub async fn register(&self, login: &str) {
        let response = self
            .request(
                "POST",
                "/api/register",
                Some(serde_json::json!({ "login": login, "pswd": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "Register failed: {:?}", response.body);
    }

    /// Register an administrator with [`PASSWORD`]
    pub async fn register_admin(&self, login: &str) {
        let response = self
            .request(
                "POST",
                "/api/register",
                Some(serde_json::json!({ "login": login, "pswd": PASSWORD, "token": ADMIN_TOKEN })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "Register failed: {:?}", response.body);
    }

    /// Login and return the session token
    pub async fn login(&self, login: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth",
                Some(serde_json::json!({ "login": login, "pswd": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "Login failed: {:?}", response.body);
        response.body["response"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Register and log in
    pub async fn user(&self, login: &str) -> String {
        self.register(login).await;
        self.login(login).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Upload a structured document
    pub async fn upload_json(&self, meta: Value, json: Value, token: Option<&str>) -> TestResponse {
        let mut body = part_header("meta", None);
        body.extend_from_slice(meta.to_string().as_bytes());
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part_header("json", None));
        body.extend_from_slice(json.to_string().as_bytes());
        body.extend_from_slice(b"\r\n");
        self.upload(body, token).await
    }

    /// Upload a file document
    pub async fn upload_file(
        &self,
        meta: Value,
        bytes: &[u8],
        content_type: &str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut body = part_header("meta", None);
        body.extend_from_slice(meta.to_string().as_bytes());
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part_header("file", Some(content_type)));
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
        self.upload(body, token).await
    }

    async fn upload(&self, mut body: Vec<u8>, token: Option<&str>) -> TestResponse {
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri("/api/docs")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}

fn part_header(name: &str, content_type: Option<&str>) -> Vec<u8> {
    let mut header = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"");
    if let Some(ct) = content_type {
        header.push_str(&format!("; filename=\"{name}.bin\"\r\nContent-Type: {ct}"));
    }
    header.push_str("\r\n\r\n");
    header.into_bytes()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, or `Null`
    pub body: Value,
    /// Raw body bytes
    pub raw: Vec<u8>,
}

impl TestResponse {
    /// The `error.text` field of an error body
    pub fn error_text(&self) -> &str {
        self.body["error"]["text"].as_str().unwrap_or_default()
    }

    /// A header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
