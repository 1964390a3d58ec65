// ABOUTME: Location hierarchy repositories for countries, states, districts, and zones
// ABOUTME: Single-table CRUD with parent joins for display names and FK dependency guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Location hierarchy storage: Country → State → District → Zone.
//!
//! Every level follows the same repository contract: list active rows
//! (alphabetical, parent name joined in), get by id, create (validate →
//! insert → re-read), update (full-column replace, 404 on zero rows),
//! hard delete guarded by foreign keys.

use super::Database;
use crate::errors::{classify_database_error, require_fields, require_id, AppError, AppResult};
use crate::models::{
    Country, CountryPayload, District, DistrictPayload, State, StatePayload, Zone, ZonePayload,
};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const COUNTRY_COLUMNS: &str = "country_id, country_name, country_code, capital, status, \
     created_by_id, created_date, updated_by_id, updated_date";

impl Database {
    /// Create location hierarchy tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_locations(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS countries (
                country_id INTEGER PRIMARY KEY AUTOINCREMENT,
                country_name TEXT NOT NULL,
                country_code TEXT NOT NULL UNIQUE,
                capital TEXT,
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
            CREATE TABLE IF NOT EXISTS states (
                state_id INTEGER PRIMARY KEY AUTOINCREMENT,
                state_name TEXT NOT NULL,
                state_code TEXT NOT NULL,
                capital TEXT,
                country_id INTEGER NOT NULL REFERENCES countries(country_id) ON DELETE RESTRICT,
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
            CREATE TABLE IF NOT EXISTS districts (
                district_id INTEGER PRIMARY KEY AUTOINCREMENT,
                district_name TEXT NOT NULL,
                district_code TEXT NOT NULL,
                state_id INTEGER NOT NULL REFERENCES states(state_id) ON DELETE RESTRICT,
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
            CREATE TABLE IF NOT EXISTS zones (
                zone_id INTEGER PRIMARY KEY AUTOINCREMENT,
                zone_name TEXT NOT NULL,
                zone_code TEXT NOT NULL,
                district_id INTEGER NOT NULL REFERENCES districts(district_id) ON DELETE RESTRICT,
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

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_states_country ON states(country_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_districts_state ON districts(state_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_zones_district ON zones(district_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ── Countries ───────────────────────────────────────────────────────

    /// List active countries ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_countries(&self) -> AppResult<Vec<Country>> {
        let rows = sqlx::query(&format!(
            "SELECT {COUNTRY_COLUMNS} FROM countries WHERE status = 1 ORDER BY country_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_country).collect())
    }

    /// Get a country by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_country(&self, country_id: i64) -> AppResult<Option<Country>> {
        let row = sqlx::query(&format!(
            "SELECT {COUNTRY_COLUMNS} FROM countries WHERE country_id = $1"
        ))
        .bind(country_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_country))
    }

    /// Insert a country and return the denormalized row
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields, a conflict error for a
    /// duplicate country code, or a database error otherwise
    pub async fn create_country(
        &self,
        payload: &CountryPayload,
        created_by: Option<i64>,
    ) -> AppResult<Country> {
        require_fields(&[
            ("country_name", &payload.country_name),
            ("country_code", &payload.country_code),
        ])?;

        let result = sqlx::query(
            r"
            INSERT INTO countries (country_name, country_code, capital, status, created_by_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&payload.country_name)
        .bind(&payload.country_code)
        .bind(&payload.capital)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Country code must be unique",
                "Country references missing records",
            )
        })?;

        self.get_country(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted country row could not be re-read"))
    }

    /// Full-column update of a country
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, a conflict error for a
    /// duplicate code, or a database error otherwise
    pub async fn update_country(
        &self,
        country_id: i64,
        payload: &CountryPayload,
        updated_by: Option<i64>,
    ) -> AppResult<Country> {
        require_fields(&[
            ("country_name", &payload.country_name),
            ("country_code", &payload.country_code),
        ])?;

        let result = sqlx::query(
            r"
            UPDATE countries SET
                country_name = $2,
                country_code = $3,
                capital = $4,
                status = $5,
                updated_by_id = $6,
                updated_date = CURRENT_TIMESTAMP
            WHERE country_id = $1
            ",
        )
        .bind(country_id)
        .bind(&payload.country_name)
        .bind(&payload.country_code)
        .bind(&payload.capital)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Country code must be unique",
                "Country references missing records",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Country"));
        }

        self.get_country(country_id)
            .await?
            .ok_or_else(|| AppError::not_found("Country"))
    }

    /// Hard-delete a country
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, or a dependency error when
    /// states still reference it
    pub async fn delete_country(&self, country_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM countries WHERE country_id = $1")
            .bind(country_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_database_error(
                    e,
                    "Country code must be unique",
                    "Country has associated records",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Country"));
        }
        Ok(())
    }

    fn row_to_country(row: &SqliteRow) -> Country {
        Country {
            country_id: row.get("country_id"),
            country_name: row.get("country_name"),
            country_code: row.get("country_code"),
            capital: row.get("capital"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }

    // ── States ──────────────────────────────────────────────────────────

    /// List active states with their country names, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_states(&self) -> AppResult<Vec<State>> {
        let rows = sqlx::query(
            r"
            SELECT s.state_id, s.state_name, s.state_code, s.capital, s.country_id,
                   s.status, s.created_by_id, s.created_date, s.updated_by_id, s.updated_date,
                   c.country_name
            FROM states s
            LEFT JOIN countries c ON c.country_id = s.country_id
            WHERE s.status = 1
            ORDER BY s.state_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_state).collect())
    }

    /// Get a state by id with its country name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_state(&self, state_id: i64) -> AppResult<Option<State>> {
        let row = sqlx::query(
            r"
            SELECT s.state_id, s.state_name, s.state_code, s.capital, s.country_id,
                   s.status, s.created_by_id, s.created_date, s.updated_by_id, s.updated_date,
                   c.country_name
            FROM states s
            LEFT JOIN countries c ON c.country_id = s.country_id
            WHERE s.state_id = $1
            ",
        )
        .bind(state_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_state))
    }

    /// Insert a state and return the denormalized row
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or an invalid country
    /// reference, or a database error otherwise
    pub async fn create_state(
        &self,
        payload: &StatePayload,
        created_by: Option<i64>,
    ) -> AppResult<State> {
        require_fields(&[
            ("state_name", &payload.state_name),
            ("state_code", &payload.state_code),
        ])?;
        let country_id = require_id("country_id", payload.country_id)?;

        let result = sqlx::query(
            r"
            INSERT INTO states (state_name, state_code, capital, country_id, status, created_by_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&payload.state_name)
        .bind(&payload.state_code)
        .bind(&payload.capital)
        .bind(country_id)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "State already exists",
                "Referenced country does not exist",
            )
        })?;

        self.get_state(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted state row could not be re-read"))
    }

    /// Full-column update of a state
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, a validation error for an
    /// invalid country reference, or a database error otherwise
    pub async fn update_state(
        &self,
        state_id: i64,
        payload: &StatePayload,
        updated_by: Option<i64>,
    ) -> AppResult<State> {
        require_fields(&[
            ("state_name", &payload.state_name),
            ("state_code", &payload.state_code),
        ])?;
        let country_id = require_id("country_id", payload.country_id)?;

        let result = sqlx::query(
            r"
            UPDATE states SET
                state_name = $2,
                state_code = $3,
                capital = $4,
                country_id = $5,
                status = $6,
                updated_by_id = $7,
                updated_date = CURRENT_TIMESTAMP
            WHERE state_id = $1
            ",
        )
        .bind(state_id)
        .bind(&payload.state_name)
        .bind(&payload.state_code)
        .bind(&payload.capital)
        .bind(country_id)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "State already exists",
                "Referenced country does not exist",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("State"));
        }

        self.get_state(state_id)
            .await?
            .ok_or_else(|| AppError::not_found("State"))
    }

    /// Hard-delete a state
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, or a dependency error when
    /// districts still reference it
    pub async fn delete_state(&self, state_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM states WHERE state_id = $1")
            .bind(state_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_database_error(e, "State already exists", "State has associated records")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("State"));
        }
        Ok(())
    }

    fn row_to_state(row: &SqliteRow) -> State {
        State {
            state_id: row.get("state_id"),
            state_name: row.get("state_name"),
            state_code: row.get("state_code"),
            capital: row.get("capital"),
            country_id: row.get("country_id"),
            country_name: row.get("country_name"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }

    // ── Districts ───────────────────────────────────────────────────────

    /// List active districts with their state names, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_districts(&self) -> AppResult<Vec<District>> {
        let rows = sqlx::query(
            r"
            SELECT d.district_id, d.district_name, d.district_code, d.state_id,
                   d.status, d.created_by_id, d.created_date, d.updated_by_id, d.updated_date,
                   s.state_name
            FROM districts d
            LEFT JOIN states s ON s.state_id = d.state_id
            WHERE d.status = 1
            ORDER BY d.district_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_district).collect())
    }

    /// Get a district by id with its state name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_district(&self, district_id: i64) -> AppResult<Option<District>> {
        let row = sqlx::query(
            r"
            SELECT d.district_id, d.district_name, d.district_code, d.state_id,
                   d.status, d.created_by_id, d.created_date, d.updated_by_id, d.updated_date,
                   s.state_name
            FROM districts d
            LEFT JOIN states s ON s.state_id = d.state_id
            WHERE d.district_id = $1
            ",
        )
        .bind(district_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_district))
    }

    /// Insert a district and return the denormalized row
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or an invalid state
    /// reference, or a database error otherwise
    pub async fn create_district(
        &self,
        payload: &DistrictPayload,
        created_by: Option<i64>,
    ) -> AppResult<District> {
        require_fields(&[
            ("district_name", &payload.district_name),
            ("district_code", &payload.district_code),
        ])?;
        let state_id = require_id("state_id", payload.state_id)?;

        let result = sqlx::query(
            r"
            INSERT INTO districts (district_name, district_code, state_id, status, created_by_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&payload.district_name)
        .bind(&payload.district_code)
        .bind(state_id)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "District already exists",
                "Referenced state does not exist",
            )
        })?;

        self.get_district(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted district row could not be re-read"))
    }

    /// Full-column update of a district
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, a validation error for an
    /// invalid state reference, or a database error otherwise
    pub async fn update_district(
        &self,
        district_id: i64,
        payload: &DistrictPayload,
        updated_by: Option<i64>,
    ) -> AppResult<District> {
        require_fields(&[
            ("district_name", &payload.district_name),
            ("district_code", &payload.district_code),
        ])?;
        let state_id = require_id("state_id", payload.state_id)?;

        let result = sqlx::query(
            r"
            UPDATE districts SET
                district_name = $2,
                district_code = $3,
                state_id = $4,
                status = $5,
                updated_by_id = $6,
                updated_date = CURRENT_TIMESTAMP
            WHERE district_id = $1
            ",
        )
        .bind(district_id)
        .bind(&payload.district_name)
        .bind(&payload.district_code)
        .bind(state_id)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "District already exists",
                "Referenced state does not exist",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("District"));
        }

        self.get_district(district_id)
            .await?
            .ok_or_else(|| AppError::not_found("District"))
    }

    /// Hard-delete a district
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, or a dependency error when
    /// zones still reference it
    pub async fn delete_district(&self, district_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM districts WHERE district_id = $1")
            .bind(district_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_database_error(
                    e,
                    "District already exists",
                    "District has associated records",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("District"));
        }
        Ok(())
    }

    fn row_to_district(row: &SqliteRow) -> District {
        District {
            district_id: row.get("district_id"),
            district_name: row.get("district_name"),
            district_code: row.get("district_code"),
            state_id: row.get("state_id"),
            state_name: row.get("state_name"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }

    // ── Zones ───────────────────────────────────────────────────────────

    /// List active zones with their district names, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_zones(&self) -> AppResult<Vec<Zone>> {
        let rows = sqlx::query(
            r"
            SELECT z.zone_id, z.zone_name, z.zone_code, z.district_id,
                   z.status, z.created_by_id, z.created_date, z.updated_by_id, z.updated_date,
                   d.district_name
            FROM zones z
            LEFT JOIN districts d ON d.district_id = z.district_id
            WHERE z.status = 1
            ORDER BY z.zone_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_zone).collect())
    }

    /// Get a zone by id with its district name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_zone(&self, zone_id: i64) -> AppResult<Option<Zone>> {
        let row = sqlx::query(
            r"
            SELECT z.zone_id, z.zone_name, z.zone_code, z.district_id,
                   z.status, z.created_by_id, z.created_date, z.updated_by_id, z.updated_date,
                   d.district_name
            FROM zones z
            LEFT JOIN districts d ON d.district_id = z.district_id
            WHERE z.zone_id = $1
            ",
        )
        .bind(zone_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_zone))
    }

    /// Insert a zone and return the denormalized row
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or an invalid district
    /// reference, or a database error otherwise
    pub async fn create_zone(
        &self,
        payload: &ZonePayload,
        created_by: Option<i64>,
    ) -> AppResult<Zone> {
        require_fields(&[
            ("zone_name", &payload.zone_name),
            ("zone_code", &payload.zone_code),
        ])?;
        let district_id = require_id("district_id", payload.district_id)?;

        let result = sqlx::query(
            r"
            INSERT INTO zones (zone_name, zone_code, district_id, status, created_by_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&payload.zone_name)
        .bind(&payload.zone_code)
        .bind(district_id)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Zone already exists",
                "Referenced district does not exist",
            )
        })?;

        self.get_zone(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted zone row could not be re-read"))
    }

    /// Full-column update of a zone
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, a validation error for an
    /// invalid district reference, or a database error otherwise
    pub async fn update_zone(
        &self,
        zone_id: i64,
        payload: &ZonePayload,
        updated_by: Option<i64>,
    ) -> AppResult<Zone> {
        require_fields(&[
            ("zone_name", &payload.zone_name),
            ("zone_code", &payload.zone_code),
        ])?;
        let district_id = require_id("district_id", payload.district_id)?;

        let result = sqlx::query(
            r"
            UPDATE zones SET
                zone_name = $2,
                zone_code = $3,
                district_id = $4,
                status = $5,
                updated_by_id = $6,
                updated_date = CURRENT_TIMESTAMP
            WHERE zone_id = $1
            ",
        )
        .bind(zone_id)
        .bind(&payload.zone_name)
        .bind(&payload.zone_code)
        .bind(district_id)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Zone already exists",
                "Referenced district does not exist",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Zone"));
        }

        self.get_zone(zone_id)
            .await?
            .ok_or_else(|| AppError::not_found("Zone"))
    }

    /// Hard-delete a zone
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, or a dependency error when
    /// other rows still reference it
    pub async fn delete_zone(&self, zone_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM zones WHERE zone_id = $1")
            .bind(zone_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_database_error(e, "Zone already exists", "Zone has associated records")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Zone"));
        }
        Ok(())
    }

    fn row_to_zone(row: &SqliteRow) -> Zone {
        Zone {
            zone_id: row.get("zone_id"),
            zone_name: row.get("zone_name"),
            zone_code: row.get("zone_code"),
            district_id: row.get("district_id"),
            district_name: row.get("district_name"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }
}
