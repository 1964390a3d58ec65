// ABOUTME: Location hierarchy route handlers for countries, states, districts, and zones
// ABOUTME: Thin CRUD wrappers around the location repositories, all JWT-protected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Location hierarchy routes. All handlers require a valid actor token; the
//! authenticated actor's id is recorded in the audit columns of every write.

use crate::{
    auth::Claims,
    errors::AppError,
    models::{
        CountryPayload, DistrictPayload, MessageResponse, StatePayload, ZonePayload,
    },
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

/// Location hierarchy routes
pub struct LocationRoutes;

impl LocationRoutes {
    /// Create all location hierarchy routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/countries",
                get(Self::handle_list_countries).post(Self::handle_create_country),
            )
            .route(
                "/api/countries/:id",
                get(Self::handle_get_country)
                    .put(Self::handle_update_country)
                    .delete(Self::handle_delete_country),
            )
            .route(
                "/api/states",
                get(Self::handle_list_states).post(Self::handle_create_state),
            )
            .route(
                "/api/states/:id",
                get(Self::handle_get_state)
                    .put(Self::handle_update_state)
                    .delete(Self::handle_delete_state),
            )
            .route(
                "/api/districts",
                get(Self::handle_list_districts).post(Self::handle_create_district),
            )
            .route(
                "/api/districts/:id",
                get(Self::handle_get_district)
                    .put(Self::handle_update_district)
                    .delete(Self::handle_delete_district),
            )
            .route(
                "/api/zones",
                get(Self::handle_list_zones).post(Self::handle_create_zone),
            )
            .route(
                "/api/zones/:id",
                get(Self::handle_get_zone)
                    .put(Self::handle_update_zone)
                    .delete(Self::handle_delete_zone),
            )
            .with_state(resources)
    }

    /// Authenticate the request and return the acting principal's claims
    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<Claims, AppError> {
        resources.auth_middleware.authenticate_headers(headers)
    }

    // ── Countries ───────────────────────────────────────────────────────

    async fn handle_list_countries(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let countries = resources.database.list_countries().await?;
        Ok((StatusCode::OK, Json(countries)).into_response())
    }

    async fn handle_get_country(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let country = resources
            .database
            .get_country(id)
            .await?
            .ok_or_else(|| AppError::not_found("Country"))?;
        Ok((StatusCode::OK, Json(country)).into_response())
    }

    async fn handle_create_country(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<CountryPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let country = resources
            .database
            .create_country(&payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::CREATED, Json(country)).into_response())
    }

    async fn handle_update_country(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<CountryPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let country = resources
            .database
            .update_country(id, &payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::OK, Json(country)).into_response())
    }

    async fn handle_delete_country(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_country(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Country deleted successfully".into(),
            }),
        )
            .into_response())
    }

    // ── States ──────────────────────────────────────────────────────────

    async fn handle_list_states(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let states = resources.database.list_states().await?;
        Ok((StatusCode::OK, Json(states)).into_response())
    }

    async fn handle_get_state(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let state = resources
            .database
            .get_state(id)
            .await?
            .ok_or_else(|| AppError::not_found("State"))?;
        Ok((StatusCode::OK, Json(state)).into_response())
    }

    async fn handle_create_state(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<StatePayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let state = resources
            .database
            .create_state(&payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::CREATED, Json(state)).into_response())
    }

    async fn handle_update_state(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<StatePayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let state = resources
            .database
            .update_state(id, &payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::OK, Json(state)).into_response())
    }

    async fn handle_delete_state(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_state(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "State deleted successfully".into(),
            }),
        )
            .into_response())
    }

    // ── Districts ───────────────────────────────────────────────────────

    async fn handle_list_districts(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let districts = resources.database.list_districts().await?;
        Ok((StatusCode::OK, Json(districts)).into_response())
    }

    async fn handle_get_district(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let district = resources
            .database
            .get_district(id)
            .await?
            .ok_or_else(|| AppError::not_found("District"))?;
        Ok((StatusCode::OK, Json(district)).into_response())
    }

    async fn handle_create_district(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<DistrictPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let district = resources
            .database
            .create_district(&payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::CREATED, Json(district)).into_response())
    }

    async fn handle_update_district(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<DistrictPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let district = resources
            .database
            .update_district(id, &payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::OK, Json(district)).into_response())
    }

    async fn handle_delete_district(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_district(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "District deleted successfully".into(),
            }),
        )
            .into_response())
    }

    // ── Zones ───────────────────────────────────────────────────────────

    async fn handle_list_zones(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let zones = resources.database.list_zones().await?;
        Ok((StatusCode::OK, Json(zones)).into_response())
    }

    async fn handle_get_zone(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let zone = resources
            .database
            .get_zone(id)
            .await?
            .ok_or_else(|| AppError::not_found("Zone"))?;
        Ok((StatusCode::OK, Json(zone)).into_response())
    }

    async fn handle_create_zone(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<ZonePayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let zone = resources
            .database
            .create_zone(&payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::CREATED, Json(zone)).into_response())
    }

    async fn handle_update_zone(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<ZonePayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let zone = resources
            .database
            .update_zone(id, &payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::OK, Json(zone)).into_response())
    }

    async fn handle_delete_zone(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_zone(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Zone deleted successfully".into(),
            }),
        )
            .into_response())
    }
}
