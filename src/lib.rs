// ABOUTME: Main library entry point for the Innkeeper lodging back-office API
// ABOUTME: Exposes master-data CRUD, menu catalog coordination, and actor authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

#![deny(unsafe_code)]

//! # Innkeeper Admin Server
//!
//! A multi-tenant lodging back-office REST API. The server exposes master-data
//! CRUD for the location hierarchy (countries, states, districts, zones), the
//! three actor account types (superadmins, agents, hotels), and the menu
//! catalog (units, categories, addons, menu items with rate variants and
//! addon associations), all backed by a pooled SQLite database.
//!
//! ## Architecture
//!
//! - **Repositories** (`database`): one module per domain, each a set of
//!   parameterized SQL statements over the shared connection pool
//! - **Composite writes** (`database::menu`, `database::actors`): multi-table
//!   writes executed all-or-nothing inside a single transaction
//! - **Auth gate** (`auth`, `middleware`): per-actor-type login flows issuing
//!   HS256 JWTs, verified on every protected route
//! - **HTTP surface** (`routes`, `server`): thin axum handlers mapping verbs
//!   and paths onto repository and coordinator calls

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// Authentication and JWT session management
pub mod auth;

/// Configuration management from process environment
pub mod config;

/// Environment variable names, defaults, and limits
pub mod constants;

/// Database access layer: pool ownership, schema bootstrap, repositories
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Health checks and monitoring
pub mod health;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request authentication
pub mod middleware;

/// Common data models for master-data entities
pub mod models;

/// HTTP route handlers grouped by domain
pub mod routes;

/// Server resource container and router assembly
pub mod server;
