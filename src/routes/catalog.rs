// ABOUTME: Catalog route handlers for units, categories, and addons
// ABOUTME: Thin CRUD wrappers around the catalog repositories, all JWT-protected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Catalog master-data routes.

use crate::{
    auth::Claims,
    errors::AppError,
    models::{AddonPayload, CategoryPayload, MessageResponse, UnitPayload},
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

/// Catalog master-data routes
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/units",
                get(Self::handle_list_units).post(Self::handle_create_unit),
            )
            .route(
                "/api/units/:id",
                get(Self::handle_get_unit)
                    .put(Self::handle_update_unit)
                    .delete(Self::handle_delete_unit),
            )
            .route(
                "/api/categories",
                get(Self::handle_list_categories).post(Self::handle_create_category),
            )
            .route(
                "/api/categories/:id",
                get(Self::handle_get_category)
                    .put(Self::handle_update_category)
                    .delete(Self::handle_delete_category),
            )
            .route(
                "/api/addons",
                get(Self::handle_list_addons).post(Self::handle_create_addon),
            )
            .route(
                "/api/addons/:id",
                get(Self::handle_get_addon)
                    .put(Self::handle_update_addon)
                    .delete(Self::handle_delete_addon),
            )
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<Claims, AppError> {
        resources.auth_middleware.authenticate_headers(headers)
    }

    // ── Units ───────────────────────────────────────────────────────────

    async fn handle_list_units(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let units = resources.database.list_units().await?;
        Ok((StatusCode::OK, Json(units)).into_response())
    }

    async fn handle_get_unit(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let unit = resources
            .database
            .get_unit(id)
            .await?
            .ok_or_else(|| AppError::not_found("Unit"))?;
        Ok((StatusCode::OK, Json(unit)).into_response())
    }

    async fn handle_create_unit(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<UnitPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let unit = resources
            .database
            .create_unit(&payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::CREATED, Json(unit)).into_response())
    }

    async fn handle_update_unit(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<UnitPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let unit = resources
            .database
            .update_unit(id, &payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::OK, Json(unit)).into_response())
    }

    async fn handle_delete_unit(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_unit(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Unit deleted successfully".into(),
            }),
        )
            .into_response())
    }

    // ── Categories ──────────────────────────────────────────────────────

    async fn handle_list_categories(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let categories = resources.database.list_categories().await?;
        Ok((StatusCode::OK, Json(categories)).into_response())
    }

    async fn handle_get_category(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let category = resources
            .database
            .get_category(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;
        Ok((StatusCode::OK, Json(category)).into_response())
    }

    async fn handle_create_category(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<CategoryPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let category = resources
            .database
            .create_category(&payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::CREATED, Json(category)).into_response())
    }

    async fn handle_update_category(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<CategoryPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let category = resources
            .database
            .update_category(id, &payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::OK, Json(category)).into_response())
    }

    async fn handle_delete_category(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_category(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Category deleted successfully".into(),
            }),
        )
            .into_response())
    }

    // ── Addons ──────────────────────────────────────────────────────────

    async fn handle_list_addons(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let addons = resources.database.list_addons().await?;
        Ok((StatusCode::OK, Json(addons)).into_response())
    }

    async fn handle_get_addon(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let addon = resources
            .database
            .get_addon(id)
            .await?
            .ok_or_else(|| AppError::not_found("Addon"))?;
        Ok((StatusCode::OK, Json(addon)).into_response())
    }

    async fn handle_create_addon(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<AddonPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let addon = resources
            .database
            .create_addon(&payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::CREATED, Json(addon)).into_response())
    }

    async fn handle_update_addon(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<AddonPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;
        let addon = resources
            .database
            .update_addon(id, &payload, Some(claims.actor_id()?))
            .await?;
        Ok((StatusCode::OK, Json(addon)).into_response())
    }

    async fn handle_delete_addon(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_addon(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Addon deleted successfully".into(),
            }),
        )
            .into_response())
    }
}
