//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the full router over a
//! temporary SQLite database, so requests run through the real middleware,
//! services and stores without binding a port.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use reelmark_core::config::{
    AuthConfig, AuthMethod, BookmarksConfig, CatalogConfig, ClientConfig, DatabaseConfig,
    ServerConfig,
};
use reelmark_core::{
    create_authenticator, AccountService, BookmarkService, Catalog, Config, SqliteAccountStore,
    SqliteBookmarkStore,
};
use reelmark_server::state::AppState;

/// Password used by [`TestFixture::sign_in`].
pub const TEST_PASSWORD: &str = "abc123";

/// Test fixture for in-process API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_bookmark_creation() {
///     let fixture = TestFixture::new().await;
///     let token = fixture.sign_in("viewer@example.com").await;
///
///     let response = fixture
///         .post_as(&token, "/api/v1/bookmarks", json!({"videoId": "3"}))
///         .await;
///
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Direct handle on the account store for seeding
    pub accounts: Arc<SqliteAccountStore>,
    /// Temporary directory holding the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture using session authentication.
    pub async fn new() -> Self {
        Self::with_auth(AuthConfig {
            method: AuthMethod::Session,
            header: None,
            session_ttl_hours: 1,
        })
        .await
    }

    /// Create a fixture with a custom auth configuration.
    pub async fn with_auth(auth: AuthConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            auth,
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            catalog: CatalogConfig::default(),
            bookmarks: BookmarksConfig::default(),
            client: ClientConfig::default(),
        };

        let accounts =
            Arc::new(SqliteAccountStore::new(&db_path).expect("Failed to create account store"));
        let bookmark_store =
            Arc::new(SqliteBookmarkStore::new(&db_path).expect("Failed to create bookmark store"));

        let authenticator: Arc<dyn reelmark_core::Authenticator> = Arc::from(
            create_authenticator(&config.auth, accounts.clone())
                .expect("Failed to create authenticator"),
        );

        let state = Arc::new(AppState::new(
            config.clone(),
            authenticator,
            Arc::new(Catalog::embedded().expect("Failed to load catalog")),
            Arc::new(BookmarkService::new(
                accounts.clone(),
                bookmark_store,
                config.bookmarks.selected_limit,
            )),
            Arc::new(AccountService::new(
                accounts.clone(),
                accounts.clone(),
                config.auth.session_ttl_hours,
            )),
        ));

        let router = reelmark_server::api::create_router(state);

        Self {
            router,
            accounts,
            temp_dir,
        }
    }

    /// Register an account and log in. Returns the session token.
    pub async fn sign_in(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/v1/users",
                json!({"email": email, "password": TEST_PASSWORD}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "register failed: {:?}", response.body);

        let response = self
            .post(
                "/api/v1/auth/login",
                json!({"email": email, "password": TEST_PASSWORD}),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);

        response.body["token"]
            .as_str()
            .expect("login response has a token")
            .to_string()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, &[]).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), &[]).await
    }

    /// Send an authenticated GET request.
    pub async fn get_as(&self, token: &str, path: &str) -> TestResponse {
        let auth = format!("Bearer {}", token);
        self.request("GET", path, None, &[("Authorization", &auth)])
            .await
    }

    /// Send an authenticated POST request with JSON body.
    pub async fn post_as(&self, token: &str, path: &str, body: Value) -> TestResponse {
        let auth = format!("Bearer {}", token);
        self.request("POST", path, Some(body), &[("Authorization", &auth)])
            .await
    }

    /// Send an authenticated DELETE request with JSON body.
    pub async fn delete_as(&self, token: &str, path: &str, body: Value) -> TestResponse {
        let auth = format!("Bearer {}", token);
        self.request("DELETE", path, Some(body), &[("Authorization", &auth)])
            .await
    }

    /// Send a request with extra headers and an optional JSON body.
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        self.request(method, path, body, headers).await
    }

    /// Send an authenticated POST request with a raw string body (for testing malformed JSON).
    pub async fn post_raw_as(&self, token: &str, path: &str, body: &str) -> TestResponse {
        let auth = format!("Bearer {}", token);
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .header("Authorization", auth)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            request_builder = request_builder.header(*name, *value);
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
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

        TestResponse {
            status,
            headers,
            body,
        }
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

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
