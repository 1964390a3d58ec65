// ABOUTME: Server health monitoring and system status checks for operational visibility
// ABOUTME: Reports service identity and database connectivity on the open /health endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Health check endpoint support

use crate::constants::service_names;
use crate::database::Database;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Overall health status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Service information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Environment (development, production, testing)
    pub environment: String,
}

/// Individual component health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Status description
    pub message: String,
    /// Check duration in milliseconds
    pub duration_ms: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service information
    pub service: ServiceInfo,
    /// Individual component checks
    pub checks: Vec<ComponentHealth>,
}

/// Run the health checks against live resources
pub async fn check(database: &Database, environment: &str) -> HealthResponse {
    let started = Instant::now();

    let database_check = match sqlx::query("SELECT 1").execute(database.pool()).await {
        Ok(_) => ComponentHealth {
            name: "database".into(),
            status: HealthStatus::Healthy,
            message: "Database connection pool responding".into(),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        },
        Err(e) => ComponentHealth {
            name: "database".into(),
            status: HealthStatus::Unhealthy,
            message: format!("Database check failed: {e}"),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        },
    };

    let status = if database_check.status == HealthStatus::Healthy {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    HealthResponse {
        status,
        service: ServiceInfo {
            name: service_names::INNKEEPER_SERVER.into(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: environment.to_owned(),
        },
        checks: vec![database_check],
    }
}
