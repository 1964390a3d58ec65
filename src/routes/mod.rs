// ABOUTME: HTTP route handler modules grouped by domain
// ABOUTME: Each module exposes a struct with a routes() constructor returning an axum Router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! HTTP route handlers.
//!
//! Every protected handler authenticates explicitly at its top via the
//! shared [`crate::middleware::AdminAuthMiddleware`], then delegates to a
//! repository or coordinator call and shapes the JSON response. Handlers
//! stay thin: no SQL and no business rules live here.

/// Actor management routes (agents, hotels)
pub mod actors;

/// Login and superadmin bootstrap routes
pub mod auth;

/// Catalog master-data routes (units, categories, addons)
pub mod catalog;

/// Location hierarchy routes (countries, states, districts, zones)
pub mod locations;

/// Composite menu item routes
pub mod menu;
