// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, resource, actor-seeding, and HTTP helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `innkeeper_server` integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use innkeeper_server::{
    auth::{ActorRole, AuthManager},
    config::environment::{
        AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    },
    database::Database,
    models::LoginAccount,
    server::ServerResources,
};
use serde::Serialize;
use std::sync::{Arc, Once};
use tower::ServiceExt;

/// Low bcrypt cost keeps credential-seeding tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Signing secret shared by test resources and token helpers
pub const TEST_JWT_SECRET: &[u8] = b"innkeeper-test-secret";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup (isolated in-memory SQLite)
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:", 10)
        .await
        .expect("Failed to create test database")
}

/// Test server configuration matching the in-memory database
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        log_level: LogLevel::Info,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: String::from_utf8_lossy(TEST_JWT_SECRET).into_owned(),
            jwt_expiry_hours: 24,
        },
        cors: CorsConfig {
            allowed_origins: "*".into(),
        },
    }
}

/// Full server resources over a fresh test database
pub async fn create_test_resources() -> Arc<ServerResources> {
    let database = create_test_database().await;
    let auth_manager = AuthManager::new(TEST_JWT_SECRET, 24);
    Arc::new(ServerResources::new(
        database,
        auth_manager,
        create_test_config(),
    ))
}

/// Seed a superadmin with the given credentials and return its id
pub async fn seed_superadmin(database: &Database, email: &str, password: &str) -> i64 {
    let hash = bcrypt::hash(password, TEST_BCRYPT_COST).unwrap();
    database
        .create_superadmin("Test Superadmin", email, &hash)
        .await
        .expect("Failed to seed superadmin")
        .superadmin_id
}

/// Mint a valid bearer token for an arbitrary actor id and role
pub fn make_token(actor_id: i64, role: ActorRole) -> String {
    let account = LoginAccount {
        id: actor_id,
        name: "Test Actor".into(),
        email: "actor@example.com".into(),
        password_hash: String::new(),
    };
    AuthManager::new(TEST_JWT_SECRET, 24)
        .generate_token(&account, role)
        .expect("Failed to generate test token")
}

/// Helper to build and execute HTTP requests against the app router
pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl TestRequest {
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a bearer token to the request
    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push(("authorization".to_owned(), format!("Bearer {token}")));
        self
    }

    /// Add a JSON body to the request
    #[must_use]
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("Failed to serialize JSON"));
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Execute the request against a router
    pub async fn send(self, app: Router) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        let request = builder
            .body(Body::from(self.body.unwrap_or_default()))
            .expect("Failed to build request");

        let response = app
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();

        TestResponse { status, body }
    }
}

/// Eagerly-read HTTP response for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not valid JSON")
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
