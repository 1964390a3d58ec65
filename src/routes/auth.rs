// ABOUTME: Actor login route handlers for the three principal types
// ABOUTME: Verifies bcrypt credentials and issues role-scoped JWTs; bootstraps the first superadmin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Authentication routes.
//!
//! Three parallel login flows (superadmin, agent, hotel), each looking up an
//! active account by email and verifying the submitted password against the
//! stored bcrypt hash. Every failure path - unknown email, wrong password,
//! inactive account - produces the IDENTICAL 401 body, so the endpoint leaks
//! nothing about which emails exist.
//!
//! `POST /api/auth/superadmin/register` provisions the first superadmin on a
//! fresh install and is rejected once one exists.

use crate::{
    auth::ActorRole,
    constants::limits,
    errors::{require_fields, AppError, AppResult},
    models::LoginAccount,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Uniform credential failure message; identical for every failure mode
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Actor login request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Actor info embedded in a login response
#[derive(Debug, Serialize, Deserialize)]
pub struct ActorInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Successful login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub actor: ActorInfo,
}

/// Superadmin bootstrap request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterSuperadminRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Superadmin bootstrap response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterSuperadminResponse {
    pub superadmin_id: i64,
    pub message: String,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/auth/superadmin/login",
                post(Self::handle_superadmin_login),
            )
            .route("/api/auth/agent/login", post(Self::handle_agent_login))
            .route("/api/auth/hotel/login", post(Self::handle_hotel_login))
            .route(
                "/api/auth/superadmin/register",
                post(Self::handle_superadmin_register),
            )
            .with_state(resources)
    }

    async fn handle_superadmin_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::login(&resources, ActorRole::Superadmin, request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_agent_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::login(&resources, ActorRole::Agent, request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_hotel_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::login(&resources, ActorRole::Hotel, request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Shared login flow for all three actor types
    async fn login(
        resources: &Arc<ServerResources>,
        role: ActorRole,
        request: LoginRequest,
    ) -> AppResult<LoginResponse> {
        info!("Login attempt for role {role}");

        let account = Self::lookup_account(resources, role, &request.email).await?;

        let Some(account) = account else {
            warn!("Login failed for role {role}: account not found or inactive");
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        // bcrypt verification is CPU-bound; keep it off the async executor
        let password = request.password.clone();
        let password_hash = account.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            warn!("Login failed for role {role}: password mismatch");
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        let token = resources
            .auth_manager
            .generate_token(&account, role)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

        info!(actor_id = account.id, "Login succeeded for role {role}");

        Ok(LoginResponse {
            token,
            expires_at: resources.auth_manager.token_expiry().to_rfc3339(),
            actor: ActorInfo {
                id: account.id,
                name: account.name,
                email: account.email,
                role: role.as_str().to_owned(),
            },
        })
    }

    /// Look up the credential record in the table matching the role
    async fn lookup_account(
        resources: &Arc<ServerResources>,
        role: ActorRole,
        email: &str,
    ) -> AppResult<Option<LoginAccount>> {
        match role {
            ActorRole::Superadmin => resources.database.get_superadmin_login(email).await,
            ActorRole::Agent => resources.database.get_agent_login(email).await,
            ActorRole::Hotel => resources.database.get_hotel_login(email).await,
        }
    }

    /// Provision the first superadmin account on a fresh install
    async fn handle_superadmin_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterSuperadminRequest>,
    ) -> Result<Response, AppError> {
        require_fields(&[
            ("name", &request.name),
            ("email", &request.email),
            ("password", &request.password),
        ])?;

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if request.password.len() < limits::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            )));
        }

        // One-shot bootstrap: once a superadmin exists, this endpoint closes
        if resources.database.superadmin_count().await? > 0 {
            warn!("Rejected superadmin registration: already provisioned");
            return Err(AppError::duplicate("Superadmin is already provisioned"));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let superadmin = resources
            .database
            .create_superadmin(&request.name, &request.email, &password_hash)
            .await?;

        info!(
            superadmin_id = superadmin.superadmin_id,
            "Provisioned initial superadmin"
        );

        Ok((
            StatusCode::CREATED,
            Json(RegisterSuperadminResponse {
                superadmin_id: superadmin.superadmin_id,
                message: "Superadmin registered successfully".into(),
            }),
        )
            .into_response())
    }

    /// Minimal email shape check
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        email[at_pos + 1..].contains('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(AuthRoutes::is_valid_email("admin@example.com"));
        assert!(!AuthRoutes::is_valid_email("a@b"));
        assert!(!AuthRoutes::is_valid_email("no-at-sign.com"));
        assert!(!AuthRoutes::is_valid_email("@example.com"));
        assert!(!AuthRoutes::is_valid_email("user@nodot"));
    }
}
