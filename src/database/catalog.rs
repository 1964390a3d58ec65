// ABOUTME: Catalog master-data repositories for units, categories, and addons
// ABOUTME: Single-table CRUD; addons join their unit for display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Catalog master data: measurement units, menu categories, and the addon
//! master list. Addons reference a unit; menu items reference categories and
//! addons, so deletes here are guarded by foreign keys.

use super::Database;
use crate::errors::{classify_database_error, require_fields, require_id, AppError, AppResult};
use crate::models::{Addon, AddonPayload, Category, CategoryPayload, Unit, UnitPayload};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create catalog tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_catalog(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS units (
                unit_id INTEGER PRIMARY KEY AUTOINCREMENT,
                unit_name TEXT NOT NULL UNIQUE,
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
            CREATE TABLE IF NOT EXISTS categories (
                category_id INTEGER PRIMARY KEY AUTOINCREMENT,
                category_name TEXT NOT NULL,
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
            CREATE TABLE IF NOT EXISTS addons_master (
                addon_id INTEGER PRIMARY KEY AUTOINCREMENT,
                addon_name TEXT NOT NULL,
                unit_id INTEGER NOT NULL REFERENCES units(unit_id) ON DELETE RESTRICT,
                rate REAL NOT NULL DEFAULT 0,
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

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_addons_unit ON addons_master(unit_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ── Units ───────────────────────────────────────────────────────────

    /// List active units ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_units(&self) -> AppResult<Vec<Unit>> {
        let rows = sqlx::query(
            "SELECT unit_id, unit_name, status, created_by_id, created_date, updated_by_id, \
             updated_date FROM units WHERE status = 1 ORDER BY unit_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_unit).collect())
    }

    /// Get a unit by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_unit(&self, unit_id: i64) -> AppResult<Option<Unit>> {
        let row = sqlx::query(
            "SELECT unit_id, unit_name, status, created_by_id, created_date, updated_by_id, \
             updated_date FROM units WHERE unit_id = $1",
        )
        .bind(unit_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_unit))
    }

    /// Insert a unit
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing name, a conflict error for a
    /// duplicate name, or a database error otherwise
    pub async fn create_unit(
        &self,
        payload: &UnitPayload,
        created_by: Option<i64>,
    ) -> AppResult<Unit> {
        require_fields(&[("unit_name", &payload.unit_name)])?;

        let result = sqlx::query(
            "INSERT INTO units (unit_name, status, created_by_id) VALUES ($1, $2, $3)",
        )
        .bind(&payload.unit_name)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Unit name must be unique",
                "Unit references missing records",
            )
        })?;

        self.get_unit(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted unit row could not be re-read"))
    }

    /// Full-column update of a unit
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, a conflict error for a
    /// duplicate name, or a database error otherwise
    pub async fn update_unit(
        &self,
        unit_id: i64,
        payload: &UnitPayload,
        updated_by: Option<i64>,
    ) -> AppResult<Unit> {
        require_fields(&[("unit_name", &payload.unit_name)])?;

        let result = sqlx::query(
            r"
            UPDATE units SET
                unit_name = $2,
                status = $3,
                updated_by_id = $4,
                updated_date = CURRENT_TIMESTAMP
            WHERE unit_id = $1
            ",
        )
        .bind(unit_id)
        .bind(&payload.unit_name)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Unit name must be unique",
                "Unit references missing records",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Unit"));
        }

        self.get_unit(unit_id)
            .await?
            .ok_or_else(|| AppError::not_found("Unit"))
    }

    /// Hard-delete a unit
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, or a dependency error when
    /// addons still reference it
    pub async fn delete_unit(&self, unit_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM units WHERE unit_id = $1")
            .bind(unit_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_database_error(
                    e,
                    "Unit name must be unique",
                    "Unit has associated records",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Unit"));
        }
        Ok(())
    }

    fn row_to_unit(row: &SqliteRow) -> Unit {
        Unit {
            unit_id: row.get("unit_id"),
            unit_name: row.get("unit_name"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }

    // ── Categories ──────────────────────────────────────────────────────

    /// List active categories ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT category_id, category_name, description, status, created_by_id, \
             created_date, updated_by_id, updated_date FROM categories WHERE status = 1 \
             ORDER BY category_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_category).collect())
    }

    /// Get a category by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_category(&self, category_id: i64) -> AppResult<Option<Category>> {
        let row = sqlx::query(
            "SELECT category_id, category_name, description, status, created_by_id, \
             created_date, updated_by_id, updated_date FROM categories WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_category))
    }

    /// Insert a category
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing name or a database error
    /// otherwise
    pub async fn create_category(
        &self,
        payload: &CategoryPayload,
        created_by: Option<i64>,
    ) -> AppResult<Category> {
        require_fields(&[("category_name", &payload.category_name)])?;

        let result = sqlx::query(
            "INSERT INTO categories (category_name, description, status, created_by_id) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&payload.category_name)
        .bind(&payload.description)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Category already exists",
                "Category references missing records",
            )
        })?;

        self.get_category(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted category row could not be re-read"))
    }

    /// Full-column update of a category
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve or a database error otherwise
    pub async fn update_category(
        &self,
        category_id: i64,
        payload: &CategoryPayload,
        updated_by: Option<i64>,
    ) -> AppResult<Category> {
        require_fields(&[("category_name", &payload.category_name)])?;

        let result = sqlx::query(
            r"
            UPDATE categories SET
                category_name = $2,
                description = $3,
                status = $4,
                updated_by_id = $5,
                updated_date = CURRENT_TIMESTAMP
            WHERE category_id = $1
            ",
        )
        .bind(category_id)
        .bind(&payload.category_name)
        .bind(&payload.description)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Category already exists",
                "Category references missing records",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Category"));
        }

        self.get_category(category_id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))
    }

    /// Hard-delete a category
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, or a dependency error when
    /// menu items still reference it
    pub async fn delete_category(&self, category_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_database_error(
                    e,
                    "Category already exists",
                    "Category has associated records",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Category"));
        }
        Ok(())
    }

    fn row_to_category(row: &SqliteRow) -> Category {
        Category {
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

    // ── Addons ──────────────────────────────────────────────────────────

    /// List active addons with their unit names, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_addons(&self) -> AppResult<Vec<Addon>> {
        let rows = sqlx::query(
            r"
            SELECT a.addon_id, a.addon_name, a.unit_id, a.rate, a.status,
                   a.created_by_id, a.created_date, a.updated_by_id, a.updated_date,
                   u.unit_name
            FROM addons_master a
            LEFT JOIN units u ON u.unit_id = a.unit_id
            WHERE a.status = 1
            ORDER BY a.addon_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_addon).collect())
    }

    /// Get an addon by id with its unit name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_addon(&self, addon_id: i64) -> AppResult<Option<Addon>> {
        let row = sqlx::query(
            r"
            SELECT a.addon_id, a.addon_name, a.unit_id, a.rate, a.status,
                   a.created_by_id, a.created_date, a.updated_by_id, a.updated_date,
                   u.unit_name
            FROM addons_master a
            LEFT JOIN units u ON u.unit_id = a.unit_id
            WHERE a.addon_id = $1
            ",
        )
        .bind(addon_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_addon))
    }

    /// Insert an addon and return the denormalized row
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or an invalid unit
    /// reference, or a database error otherwise
    pub async fn create_addon(
        &self,
        payload: &AddonPayload,
        created_by: Option<i64>,
    ) -> AppResult<Addon> {
        require_fields(&[("addon_name", &payload.addon_name)])?;
        let unit_id = require_id("unit_id", payload.unit_id)?;

        let result = sqlx::query(
            "INSERT INTO addons_master (addon_name, unit_id, rate, status, created_by_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&payload.addon_name)
        .bind(unit_id)
        .bind(payload.rate.unwrap_or(0.0))
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(e, "Addon already exists", "Referenced unit does not exist")
        })?;

        self.get_addon(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted addon row could not be re-read"))
    }

    /// Full-column update of an addon
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, a validation error for an
    /// invalid unit reference, or a database error otherwise
    pub async fn update_addon(
        &self,
        addon_id: i64,
        payload: &AddonPayload,
        updated_by: Option<i64>,
    ) -> AppResult<Addon> {
        require_fields(&[("addon_name", &payload.addon_name)])?;
        let unit_id = require_id("unit_id", payload.unit_id)?;

        let result = sqlx::query(
            r"
            UPDATE addons_master SET
                addon_name = $2,
                unit_id = $3,
                rate = $4,
                status = $5,
                updated_by_id = $6,
                updated_date = CURRENT_TIMESTAMP
            WHERE addon_id = $1
            ",
        )
        .bind(addon_id)
        .bind(&payload.addon_name)
        .bind(unit_id)
        .bind(payload.rate.unwrap_or(0.0))
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(e, "Addon already exists", "Referenced unit does not exist")
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Addon"));
        }

        self.get_addon(addon_id)
            .await?
            .ok_or_else(|| AppError::not_found("Addon"))
    }

    /// Hard-delete an addon
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, or a dependency error when
    /// menu items still reference it
    pub async fn delete_addon(&self, addon_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM addons_master WHERE addon_id = $1")
            .bind(addon_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_database_error(e, "Addon already exists", "Addon has associated records")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Addon"));
        }
        Ok(())
    }

    fn row_to_addon(row: &SqliteRow) -> Addon {
        Addon {
            addon_id: row.get("addon_id"),
            addon_name: row.get("addon_name"),
            unit_id: row.get("unit_id"),
            unit_name: row.get("unit_name"),
            rate: row.get("rate"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }
}
