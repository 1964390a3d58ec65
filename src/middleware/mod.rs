// ABOUTME: HTTP middleware modules for request authentication
// ABOUTME: Re-exports the admin auth middleware used by protected routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

/// Bearer-token authentication middleware
pub mod auth;

pub use auth::AdminAuthMiddleware;
