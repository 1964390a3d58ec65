// ABOUTME: Centralized resource container and axum router assembly
// ABOUTME: Injects the database pool and auth managers into every route group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! # Server Resources and Router Assembly
//!
//! [`ServerResources`] is the dependency-injection container: the database
//! pool, auth manager, and configuration are constructed once in the binary
//! and shared by every handler through an `Arc`. Nothing in this crate
//! reaches for global mutable state.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::health;
use crate::middleware::AdminAuthMiddleware;
use crate::routes::{
    actors::ActorRoutes, auth::AuthRoutes, catalog::CatalogRoutes, locations::LocationRoutes,
    menu::MenuRoutes,
};
use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use http::{header, HeaderValue, Method};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    pub database: Database,
    pub auth_manager: AuthManager,
    pub auth_middleware: AdminAuthMiddleware,
    pub config: ServerConfig,
}

impl ServerResources {
    /// Create new server resources with shared auth state
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        let auth_middleware = AdminAuthMiddleware::new(auth_manager.clone());
        Self {
            database,
            auth_manager,
            auth_middleware,
            config,
        }
    }
}

/// Assemble the full application router with CORS and trace layers
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(LocationRoutes::routes(resources.clone()))
        .merge(CatalogRoutes::routes(resources.clone()))
        .merge(ActorRoutes::routes(resources.clone()))
        .merge(MenuRoutes::routes(resources.clone()))
        .merge(
            Router::new()
                .route("/health", get(handle_health))
                .with_state(resources),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Open health endpoint
async fn handle_health(
    State(resources): State<Arc<ServerResources>>,
) -> impl IntoResponse {
    let response = health::check(
        &resources.database,
        &resources.config.environment.to_string(),
    )
    .await;

    let status = if response.status == health::HealthStatus::Healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Configure CORS from the `CORS_ALLOWED_ORIGINS` setting.
///
/// A wildcard or empty setting allows any origin (development); a
/// comma-separated list restricts origins (production).
fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.cors.allowed_origins.is_empty()
        || config.cors.allowed_origins == "*"
    {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
        ])
}

/// Bind the listen socket and serve until shutdown
///
/// # Errors
///
/// Returns an error if the socket cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>, port: u16) -> Result<()> {
    let app = router(resources);

    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
