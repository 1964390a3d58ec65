// ABOUTME: Database access layer owning the bounded SQLite connection pool
// ABOUTME: Bootstraps the canonical schema and hosts the per-domain repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! # Database Management
//!
//! This module owns the connection pool and the schema bootstrap routine.
//! Repository operations live in per-domain submodules (`locations`,
//! `catalog`, `actors`, `menu`), each implemented as `impl Database` blocks
//! of parameterized SQL. The pool is an explicitly constructed dependency:
//! it is created once in the binary and injected through
//! [`crate::server::ServerResources`], never reached through global state.

mod actors;
mod catalog;
mod locations;
mod menu;

/// Transaction guard used by the composite write paths
pub mod transactions;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Database manager for master-data storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection pool and bootstrap the schema
    ///
    /// Foreign keys are enforced on every pooled connection; the dependency
    /// error taxonomy relies on the engine rejecting orphaning writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid, the pool cannot
    /// be opened, or schema bootstrap fails
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database exists per connection; more than one pooled
        // connection would each see an empty schema.
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            max_connections
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database schema bootstrap
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        // Location hierarchy
        self.migrate_locations().await?;

        // Actor tables
        self.migrate_actors().await?;

        // Catalog master data
        self.migrate_catalog().await?;

        // Menu domain
        self.migrate_menu().await?;

        Ok(())
    }
}
