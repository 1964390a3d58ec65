// ABOUTME: Application constants for environment variables, defaults, and limits
// ABOUTME: Centralizes magic values so configuration and code agree on names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Application-wide constants

/// Environment variable names read by [`crate::config::environment::ServerConfig`]
pub mod env_config {
    /// Database connection string (`sqlite:path`, `sqlite::memory:`)
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Maximum size of the connection pool
    pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// JWT signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// JWT expiry in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Comma-separated list of allowed CORS origins, or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Hardcoded fallback defaults for local development.
/// A real deployment must set the corresponding environment variables,
/// especially [`env_config::JWT_SECRET`].
pub mod defaults {
    /// Default HTTP listen port
    pub const HTTP_PORT: u16 = 8081;
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/innkeeper.db";
    /// Development-only JWT signing secret
    pub const JWT_SECRET: &str = "innkeeper-dev-secret-do-not-deploy";
    /// Default service host for startup logging
    pub const HOST: &str = "127.0.0.1";
}

/// Operational limits
pub mod limits {
    /// Bounded connection pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 10;
    /// Actor session expiry
    pub const SESSION_EXPIRY_HOURS: i64 = 24;
    /// Minimum accepted password length for actor accounts
    pub const MIN_PASSWORD_LENGTH: usize = 8;
}

/// Service identity used in logs and health output
pub mod service_names {
    /// Canonical service name
    pub const INNKEEPER_SERVER: &str = "innkeeper-server";
}
