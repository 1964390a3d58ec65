// ABOUTME: Actor management route handlers for agents and hotels
// ABOUTME: Hashes submitted passwords before storage and enforces role-based creation rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Actor management routes.
//!
//! Agents are managed by superadmins; hotels by superadmins or agents. The
//! acting principal becomes the new actor's `created_by_id` lineage pointer.
//! Deletes are soft: the row is flagged inactive and drops out of listings
//! and login, but stays resolvable as a lineage target.

use crate::{
    auth::{ActorRole, Claims},
    constants::limits,
    errors::{AppError, ErrorCode},
    middleware::AdminAuthMiddleware,
    models::{AgentPayload, HotelPayload, MessageResponse},
    server::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Actor management routes
pub struct ActorRoutes;

impl ActorRoutes {
    /// Create all actor management routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/agents",
                get(Self::handle_list_agents).post(Self::handle_create_agent),
            )
            .route(
                "/api/agents/:id",
                get(Self::handle_get_agent)
                    .put(Self::handle_update_agent)
                    .delete(Self::handle_delete_agent),
            )
            .route(
                "/api/hotels",
                get(Self::handle_list_hotels).post(Self::handle_create_hotel),
            )
            .route(
                "/api/hotels/:id",
                get(Self::handle_get_hotel)
                    .put(Self::handle_update_hotel)
                    .delete(Self::handle_delete_hotel),
            )
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<Claims, AppError> {
        resources.auth_middleware.authenticate_headers(headers)
    }

    /// Hash a submitted password after checking its strength
    fn hash_password(password: &str) -> Result<String, AppError> {
        if password.len() < limits::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            )));
        }
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Required password on create; present-and-non-empty or a 400 naming it
    fn require_password(password: Option<&String>) -> Result<String, AppError> {
        match password {
            Some(p) if !p.trim().is_empty() => Self::hash_password(p),
            _ => Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Missing required field(s): password",
            )),
        }
    }

    /// Optional password on update; `None` leaves the stored hash unchanged
    fn optional_password(password: Option<&String>) -> Result<Option<String>, AppError> {
        match password {
            Some(p) if !p.trim().is_empty() => Ok(Some(Self::hash_password(p)?)),
            _ => Ok(None),
        }
    }

    // ── Agents ──────────────────────────────────────────────────────────

    async fn handle_list_agents(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let agents = resources.database.list_agents().await?;
        Ok((StatusCode::OK, Json(agents)).into_response())
    }

    async fn handle_get_agent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let agent = resources
            .database
            .get_agent(id)
            .await?
            .ok_or_else(|| AppError::not_found("Agent"))?;
        Ok((StatusCode::OK, Json(agent)).into_response())
    }

    async fn handle_create_agent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<AgentPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        AdminAuthMiddleware::require_role(&claims, &[ActorRole::Superadmin])?;

        let password_hash = Self::require_password(payload.password.as_ref())?;
        let agent = resources
            .database
            .create_agent(&payload, &password_hash, Some(claims.actor_id()?))
            .await?;

        Ok((StatusCode::CREATED, Json(agent)).into_response())
    }

    async fn handle_update_agent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<AgentPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        AdminAuthMiddleware::require_role(&claims, &[ActorRole::Superadmin])?;

        let password_hash = Self::optional_password(payload.password.as_ref())?;
        let agent = resources
            .database
            .update_agent(
                id,
                &payload,
                password_hash.as_deref(),
                Some(claims.actor_id()?),
            )
            .await?;

        Ok((StatusCode::OK, Json(agent)).into_response())
    }

    async fn handle_delete_agent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        AdminAuthMiddleware::require_role(&claims, &[ActorRole::Superadmin])?;

        resources.database.soft_delete_agent(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Agent deactivated successfully".into(),
            }),
        )
            .into_response())
    }

    // ── Hotels ──────────────────────────────────────────────────────────

    async fn handle_list_hotels(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let hotels = resources.database.list_hotels().await?;
        Ok((StatusCode::OK, Json(hotels)).into_response())
    }

    async fn handle_get_hotel(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let hotel = resources
            .database
            .get_hotel(id)
            .await?
            .ok_or_else(|| AppError::not_found("Hotel"))?;
        Ok((StatusCode::OK, Json(hotel)).into_response())
    }

    async fn handle_create_hotel(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<HotelPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        AdminAuthMiddleware::require_role(
            &claims,
            &[ActorRole::Superadmin, ActorRole::Agent],
        )?;

        let password_hash = Self::require_password(payload.password.as_ref())?;
        let hotel = resources
            .database
            .create_hotel(&payload, &password_hash, Some(claims.actor_id()?))
            .await?;

        Ok((StatusCode::CREATED, Json(hotel)).into_response())
    }

    async fn handle_update_hotel(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<HotelPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        AdminAuthMiddleware::require_role(
            &claims,
            &[ActorRole::Superadmin, ActorRole::Agent],
        )?;

        let password_hash = Self::optional_password(payload.password.as_ref())?;
        let hotel = resources
            .database
            .update_hotel(
                id,
                &payload,
                password_hash.as_deref(),
                Some(claims.actor_id()?),
            )
            .await?;

        Ok((StatusCode::OK, Json(hotel)).into_response())
    }

    async fn handle_delete_hotel(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        AdminAuthMiddleware::require_role(
            &claims,
            &[ActorRole::Superadmin, ActorRole::Agent],
        )?;

        resources.database.soft_delete_hotel(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Hotel deactivated successfully".into(),
            }),
        )
            .into_response())
    }
}
