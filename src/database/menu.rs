// ABOUTME: Composite write coordinator for menu items, their rate variants, and addon links
// ABOUTME: Every multi-table write commits atomically or rolls back leaving zero rows behind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Menu domain storage: the composite write path.
//!
//! A menu item fans out across three tables: one `menumaster` row, N
//! `menu_details` rows (one per priced variant), and M `menuaddon` junction
//! rows. The variant and addon sets have no lifecycle of their own - they are
//! wholly owned by the menu item, and every write here replaces them as a
//! set. All multi-statement writes run under a [`TransactionGuard`], so a
//! failure at any step (an addon id that does not exist, a duplicate variant
//! type) leaves the database exactly as it was: no partial menu item is ever
//! visible to a concurrent reader.
//!
//! Deletion checks that the parent row exists BEFORE touching child tables.
//! A `404` from this module therefore guarantees that no child row was
//! removed.

use super::transactions::TransactionGuard;
use super::Database;
use crate::errors::{classify_database_error, require_fields, require_id, AppError, AppResult};
use crate::models::{
    MenuAddonLink, MenuItem, MenuItemPayload, MenuItemSummary, MenuVariant, MenuVariantPayload,
};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

impl Database {
    /// Create menu domain tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_menu(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS menumaster (
                menu_id INTEGER PRIMARY KEY AUTOINCREMENT,
                menu_name TEXT NOT NULL,
                category_id INTEGER NOT NULL REFERENCES categories(category_id) ON DELETE RESTRICT,
                description TEXT,
                status INTEGER NOT NULL DEFAULT 1,
                created_by_id INTEGER,
                created_date DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_by_id INTEGER,
                updated_date DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS menu_details (
                menu_detail_id INTEGER PRIMARY KEY AUTOINCREMENT,
                menu_id INTEGER NOT NULL REFERENCES menumaster(menu_id) ON DELETE RESTRICT,
                variant_type TEXT NOT NULL,
                rate REAL NOT NULL,
                UNIQUE(menu_id, variant_type)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS menuaddon (
                menu_addon_id INTEGER PRIMARY KEY AUTOINCREMENT,
                menu_id INTEGER NOT NULL REFERENCES menumaster(menu_id) ON DELETE RESTRICT,
                addon_id INTEGER NOT NULL REFERENCES addons_master(addon_id) ON DELETE RESTRICT,
                UNIQUE(menu_id, addon_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_menu_details_menu ON menu_details(menu_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_menuaddon_menu ON menuaddon(menu_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// List active menu items (master rows only) with category names
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_menu_items(&self) -> AppResult<Vec<MenuItemSummary>> {
        let rows = sqlx::query(
            r"
            SELECT m.menu_id, m.menu_name, m.category_id, m.description, m.status,
                   m.created_by_id, m.created_date, m.updated_by_id, m.updated_date,
                   c.category_name
            FROM menumaster m
            LEFT JOIN categories c ON c.category_id = m.category_id
            WHERE m.status = 1
            ORDER BY m.menu_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_menu_summary).collect())
    }

    /// Get a full composite menu item: master row plus variant and addon sets
    ///
    /// # Errors
    ///
    /// Returns an error if any of the queries fail
    pub async fn get_menu_item(&self, menu_id: i64) -> AppResult<Option<MenuItem>> {
        let row = sqlx::query(
            r"
            SELECT m.menu_id, m.menu_name, m.category_id, m.description, m.status,
                   m.created_by_id, m.created_date, m.updated_by_id, m.updated_date,
                   c.category_name
            FROM menumaster m
            LEFT JOIN categories c ON c.category_id = m.category_id
            WHERE m.menu_id = $1
            ",
        )
        .bind(menu_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let summary = Self::row_to_menu_summary(&row);
        let variants = self.get_menu_variants(menu_id).await?;
        let addons = self.get_menu_addons(menu_id).await?;

        Ok(Some(MenuItem {
            summary,
            variants,
            addons,
        }))
    }

    /// Get the variant rows owned by a menu item
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_menu_variants(&self, menu_id: i64) -> AppResult<Vec<MenuVariant>> {
        let rows = sqlx::query(
            "SELECT menu_detail_id, menu_id, variant_type, rate FROM menu_details \
             WHERE menu_id = $1 ORDER BY menu_detail_id ASC",
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| MenuVariant {
                menu_detail_id: row.get("menu_detail_id"),
                menu_id: row.get("menu_id"),
                variant_type: row.get("variant_type"),
                rate: row.get("rate"),
            })
            .collect())
    }

    /// Get the addon junction rows owned by a menu item, with display fields
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_menu_addons(&self, menu_id: i64) -> AppResult<Vec<MenuAddonLink>> {
        let rows = sqlx::query(
            r"
            SELECT ma.menu_addon_id, ma.menu_id, ma.addon_id, a.addon_name, a.rate
            FROM menuaddon ma
            LEFT JOIN addons_master a ON a.addon_id = ma.addon_id
            WHERE ma.menu_id = $1
            ORDER BY ma.menu_addon_id ASC
            ",
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| MenuAddonLink {
                menu_addon_id: row.get("menu_addon_id"),
                menu_id: row.get("menu_id"),
                addon_id: row.get("addon_id"),
                addon_name: row.get("addon_name"),
                rate: row.get("rate"),
            })
            .collect())
    }

    /// Check whether a menu item exists (regardless of status)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn menu_item_exists(&self, menu_id: i64) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM menumaster WHERE menu_id = $1")
                .bind(menu_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    // ── Composite writes ────────────────────────────────────────────────

    /// Create a menu item together with its variant and addon sets,
    /// atomically. Returns the generated menu id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields, a 400 for an unknown
    /// category or addon reference or a duplicate variant type, or a database
    /// error otherwise. On any failure no row of the attempt is visible.
    pub async fn create_menu_item(
        &self,
        payload: &MenuItemPayload,
        created_by: Option<i64>,
    ) -> AppResult<i64> {
        require_fields(&[("menu_name", &payload.menu_name)])?;
        let category_id = require_id("category_id", payload.category_id)?;

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        let result = sqlx::query(
            "INSERT INTO menumaster (menu_name, category_id, description, status, created_by_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&payload.menu_name)
        .bind(category_id)
        .bind(&payload.description)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(guard.executor()?)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Menu item already exists",
                "Referenced category does not exist",
            )
        })?;

        let menu_id = result.last_insert_rowid();

        Self::insert_menu_children(guard.executor()?, menu_id, &payload.variants, &payload.addons)
            .await?;

        guard.commit().await?;

        tracing::info!(
            menu_id,
            variants = payload.variants.len(),
            addons = payload.addons.len(),
            "Created composite menu item"
        );

        Ok(menu_id)
    }

    /// Replace a menu item wholesale: scalar columns on the master row plus
    /// the full variant and addon sets, atomically.
    ///
    /// # Errors
    ///
    /// Returns 404 (with nothing modified) if the menu id does not resolve,
    /// the same 400 classifications as create, or a database error otherwise
    pub async fn update_menu_item(
        &self,
        menu_id: i64,
        payload: &MenuItemPayload,
        updated_by: Option<i64>,
    ) -> AppResult<()> {
        require_fields(&[("menu_name", &payload.menu_name)])?;
        let category_id = require_id("category_id", payload.category_id)?;

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        let result = sqlx::query(
            r"
            UPDATE menumaster SET
                menu_name = $2,
                category_id = $3,
                description = $4,
                status = $5,
                updated_by_id = $6,
                updated_date = CURRENT_TIMESTAMP
            WHERE menu_id = $1
            ",
        )
        .bind(menu_id)
        .bind(&payload.menu_name)
        .bind(category_id)
        .bind(&payload.description)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(guard.executor()?)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Menu item already exists",
                "Referenced category does not exist",
            )
        })?;

        if result.rows_affected() == 0 {
            // Guard drop rolls the open transaction back
            return Err(AppError::not_found("Menu item"));
        }

        // Replace-not-merge: drop the entire owned child sets, then insert
        // exactly what the caller supplied
        sqlx::query("DELETE FROM menu_details WHERE menu_id = $1")
            .bind(menu_id)
            .execute(guard.executor()?)
            .await
            .map_err(AppError::from)?;
        sqlx::query("DELETE FROM menuaddon WHERE menu_id = $1")
            .bind(menu_id)
            .execute(guard.executor()?)
            .await
            .map_err(AppError::from)?;

        Self::insert_menu_children(guard.executor()?, menu_id, &payload.variants, &payload.addons)
            .await?;

        guard.commit().await?;

        tracing::info!(
            menu_id,
            variants = payload.variants.len(),
            addons = payload.addons.len(),
            "Replaced composite menu item"
        );

        Ok(())
    }

    /// Delete a menu item and its owned child rows, atomically.
    ///
    /// The existence check runs BEFORE any child statement: a `404` from
    /// this method guarantees no child row was removed.
    ///
    /// # Errors
    ///
    /// Returns 404 if the menu id does not resolve, or a database error
    /// otherwise
    pub async fn delete_menu_item(&self, menu_id: i64) -> AppResult<()> {
        if !self.menu_item_exists(menu_id).await? {
            return Err(AppError::not_found("Menu item"));
        }

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        // Children first to satisfy foreign-key ordering
        sqlx::query("DELETE FROM menu_details WHERE menu_id = $1")
            .bind(menu_id)
            .execute(guard.executor()?)
            .await
            .map_err(AppError::from)?;
        sqlx::query("DELETE FROM menuaddon WHERE menu_id = $1")
            .bind(menu_id)
            .execute(guard.executor()?)
            .await
            .map_err(AppError::from)?;

        let result = sqlx::query("DELETE FROM menumaster WHERE menu_id = $1")
            .bind(menu_id)
            .execute(guard.executor()?)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            // Lost a race with a concurrent delete; roll back the child deletes
            guard.rollback().await?;
            return Err(AppError::not_found("Menu item"));
        }

        guard.commit().await?;

        tracing::info!(menu_id, "Deleted composite menu item");
        Ok(())
    }

    /// Replace the addon set of a menu item, atomically.
    ///
    /// # Errors
    ///
    /// Returns 404 if the menu id does not resolve, a 400 for an unknown
    /// addon reference, or a database error otherwise
    pub async fn replace_menu_addons(&self, menu_id: i64, addon_ids: &[i64]) -> AppResult<()> {
        if !self.menu_item_exists(menu_id).await? {
            return Err(AppError::not_found("Menu item"));
        }

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        sqlx::query("DELETE FROM menuaddon WHERE menu_id = $1")
            .bind(menu_id)
            .execute(guard.executor()?)
            .await
            .map_err(AppError::from)?;

        Self::insert_menu_addon_rows(guard.executor()?, menu_id, addon_ids).await?;

        guard.commit().await?;

        tracing::info!(menu_id, addons = addon_ids.len(), "Replaced menu addon set");
        Ok(())
    }

    // ── Shared insert steps ─────────────────────────────────────────────

    /// Insert the owned variant and addon sets for a menu id within an open
    /// transaction
    async fn insert_menu_children(
        conn: &mut SqliteConnection,
        menu_id: i64,
        variants: &[MenuVariantPayload],
        addon_ids: &[i64],
    ) -> AppResult<()> {
        for variant in variants {
            require_fields(&[("variant_type", &variant.variant_type)])?;

            sqlx::query(
                "INSERT INTO menu_details (menu_id, variant_type, rate) VALUES ($1, $2, $3)",
            )
            .bind(menu_id)
            .bind(&variant.variant_type)
            .bind(variant.rate)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                classify_database_error(
                    e,
                    "Variant type must be unique per menu item",
                    "Referenced menu item does not exist",
                )
            })?;
        }

        Self::insert_menu_addon_rows(conn, menu_id, addon_ids).await
    }

    /// Insert junction rows linking a menu id to each addon id within an
    /// open transaction
    async fn insert_menu_addon_rows(
        conn: &mut SqliteConnection,
        menu_id: i64,
        addon_ids: &[i64],
    ) -> AppResult<()> {
        for addon_id in addon_ids {
            sqlx::query("INSERT INTO menuaddon (menu_id, addon_id) VALUES ($1, $2)")
                .bind(menu_id)
                .bind(addon_id)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    classify_database_error(
                        e,
                        "Addon is already linked to this menu item",
                        "Referenced addon does not exist",
                    )
                })?;
        }
        Ok(())
    }

    fn row_to_menu_summary(row: &SqliteRow) -> MenuItemSummary {
        MenuItemSummary {
            menu_id: row.get("menu_id"),
            menu_name: row.get("menu_name"),
            category_id: row.get("category_id"),
            category_name: row.get("category_name"),
            description: row.get("description"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }
}
