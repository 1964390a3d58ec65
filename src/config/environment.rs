// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_config, limits};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Bounded connection pool size
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT expiry in hours
    pub jwt_expiry_hours: i64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or `*` for any
    pub allowed_origins: String,
}

/// Complete server configuration sourced from process environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with development fallbacks
    ///
    /// # Errors
    ///
    /// Returns an error if a set environment variable fails to parse
    /// (e.g. a non-numeric `HTTP_PORT`).
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var(env_config::ENVIRONMENT).unwrap_or_default(),
        );

        let http_port = match env::var(env_config::HTTP_PORT) {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("Invalid {}: {value}", env_config::HTTP_PORT))?,
            Err(_) => defaults::HTTP_PORT,
        };

        let max_connections = match env::var(env_config::DATABASE_MAX_CONNECTIONS) {
            Ok(value) => value.parse::<u32>().with_context(|| {
                format!("Invalid {}: {value}", env_config::DATABASE_MAX_CONNECTIONS)
            })?,
            Err(_) => limits::DATABASE_MAX_CONNECTIONS,
        };

        let jwt_expiry_hours = match env::var(env_config::JWT_EXPIRY_HOURS) {
            Ok(value) => value
                .parse::<i64>()
                .with_context(|| format!("Invalid {}: {value}", env_config::JWT_EXPIRY_HOURS))?,
            Err(_) => limits::SESSION_EXPIRY_HOURS,
        };

        let jwt_secret = env::var(env_config::JWT_SECRET).unwrap_or_else(|_| {
            if environment.is_production() {
                warn!(
                    "{} is not set; falling back to the development signing secret",
                    env_config::JWT_SECRET
                );
            }
            defaults::JWT_SECRET.to_owned()
        });

        let database_url = env::var(env_config::DATABASE_URL)
            .map_or_else(|_| DatabaseUrl::default(), |url| DatabaseUrl::parse_url(&url));

        Ok(Self {
            http_port,
            log_level: LogLevel::from_str_or_default(
                &env::var("RUST_LOG").unwrap_or_default(),
            ),
            environment,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            cors: CorsConfig {
                allowed_origins: env::var(env_config::CORS_ALLOWED_ORIGINS)
                    .unwrap_or_else(|_| "*".to_owned()),
            },
        })
    }

    /// One-line configuration summary for startup logging.
    /// Never includes the JWT secret.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} environment={} database={} pool_max={} jwt_expiry={}h",
            self.http_port,
            self.environment,
            self.database.url,
            self.database.max_connections,
            self.auth.jwt_expiry_hours
        )
    }
}
