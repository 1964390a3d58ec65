// ABOUTME: Server binary wiring configuration, logging, database, and HTTP serving
// ABOUTME: Explicit init lifecycle; the pool is constructed here and injected everywhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! # Innkeeper Admin Server Binary
//!
//! Starts the lodging back-office REST API with actor authentication and a
//! pooled SQLite database.

use anyhow::Result;
use clap::Parser;
use innkeeper_server::{
    auth::AuthManager,
    config::environment::ServerConfig,
    database::Database,
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "innkeeper-server")]
#[command(about = "Innkeeper - lodging back-office REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Innkeeper Admin Server");
    info!("{}", config.summary());

    // Initialize database: pool construction + schema bootstrap
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database.url.to_connection_string());
    let database = Database::new(&database_url, config.database.max_connections).await?;
    info!("Database initialized successfully: {database_url}");

    // Initialize authentication manager from the configured secret
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.jwt_expiry_hours,
    );
    info!("Authentication manager initialized");

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));

    display_available_endpoints(http_port);
    info!("Ready to serve master data");

    if let Err(e) = server::run(resources, http_port).await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints at startup
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST")
        .unwrap_or_else(|_| innkeeper_server::constants::defaults::HOST.to_owned());

    info!("=== Available API Endpoints ===");
    info!("Authentication:");
    info!("   Superadmin Login:    POST http://{host}:{port}/api/auth/superadmin/login");
    info!("   Agent Login:         POST http://{host}:{port}/api/auth/agent/login");
    info!("   Hotel Login:         POST http://{host}:{port}/api/auth/hotel/login");
    info!("   Superadmin Bootstrap: POST http://{host}:{port}/api/auth/superadmin/register");
    info!("Location Hierarchy (CRUD):");
    info!("   Countries:           http://{host}:{port}/api/countries");
    info!("   States:              http://{host}:{port}/api/states");
    info!("   Districts:           http://{host}:{port}/api/districts");
    info!("   Zones:               http://{host}:{port}/api/zones");
    info!("Catalog (CRUD):");
    info!("   Units:               http://{host}:{port}/api/units");
    info!("   Categories:          http://{host}:{port}/api/categories");
    info!("   Addons:              http://{host}:{port}/api/addons");
    info!("Actors (CRUD, soft delete):");
    info!("   Agents:              http://{host}:{port}/api/agents");
    info!("   Hotels:              http://{host}:{port}/api/hotels");
    info!("Menu Items (composite):");
    info!("   Menus:               http://{host}:{port}/api/menus");
    info!("   Menu Addon Set:      http://{host}:{port}/api/menus/{{id}}/addons");
    info!("Monitoring:");
    info!("   Health Check:        GET  http://{host}:{port}/health");
    info!("=== End of Endpoint List ===");
}
