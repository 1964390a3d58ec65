// ABOUTME: Composite menu item route handlers including the addon bulk-replace sub-resource
// ABOUTME: Delegates all multi-table writes to the transactional coordinator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Menu item routes.
//!
//! Create and update are composite writes: the request body carries the
//! master fields plus the FULL variant and addon sets, and the coordinator
//! lands them atomically. The `/addons` sub-resource replaces a menu item's
//! addon set wholesale without touching its variants.

use crate::{
    auth::Claims,
    errors::AppError,
    models::{MenuItemPayload, MessageResponse, ReplaceMenuAddonsPayload},
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

/// Composite menu item routes
pub struct MenuRoutes;

impl MenuRoutes {
    /// Create all menu routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/menus",
                get(Self::handle_list_menus).post(Self::handle_create_menu),
            )
            .route(
                "/api/menus/:id",
                get(Self::handle_get_menu)
                    .put(Self::handle_update_menu)
                    .delete(Self::handle_delete_menu),
            )
            .route(
                "/api/menus/:id/addons",
                get(Self::handle_get_menu_addons).put(Self::handle_replace_menu_addons),
            )
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<Claims, AppError> {
        resources.auth_middleware.authenticate_headers(headers)
    }

    async fn handle_list_menus(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let menus = resources.database.list_menu_items().await?;
        Ok((StatusCode::OK, Json(menus)).into_response())
    }

    async fn handle_get_menu(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let menu = resources
            .database
            .get_menu_item(id)
            .await?
            .ok_or_else(|| AppError::not_found("Menu item"))?;
        Ok((StatusCode::OK, Json(menu)).into_response())
    }

    async fn handle_create_menu(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<MenuItemPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;

        let menu_id = resources
            .database
            .create_menu_item(&payload, Some(claims.actor_id()?))
            .await?;

        // Re-read so the response carries generated child ids and joins
        let menu = resources
            .database
            .get_menu_item(menu_id)
            .await?
            .ok_or_else(|| AppError::internal("Created menu item could not be re-read"))?;

        Ok((StatusCode::CREATED, Json(menu)).into_response())
    }

    async fn handle_update_menu(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<MenuItemPayload>,
    ) -> Result<Response, AppError> {
        let claims = Self::authenticate(&headers, &resources)?;

        resources
            .database
            .update_menu_item(id, &payload, Some(claims.actor_id()?))
            .await?;

        let menu = resources
            .database
            .get_menu_item(id)
            .await?
            .ok_or_else(|| AppError::not_found("Menu item"))?;

        Ok((StatusCode::OK, Json(menu)).into_response())
    }

    async fn handle_delete_menu(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.database.delete_menu_item(id).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Menu item deleted successfully".into(),
            }),
        )
            .into_response())
    }

    async fn handle_get_menu_addons(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;

        if !resources.database.menu_item_exists(id).await? {
            return Err(AppError::not_found("Menu item"));
        }

        let addons = resources.database.get_menu_addons(id).await?;
        Ok((StatusCode::OK, Json(addons)).into_response())
    }

    async fn handle_replace_menu_addons(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(payload): Json<ReplaceMenuAddonsPayload>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;

        resources
            .database
            .replace_menu_addons(id, &payload.addons)
            .await?;

        let addons = resources.database.get_menu_addons(id).await?;
        Ok((StatusCode::OK, Json(addons)).into_response())
    }
}
