// ABOUTME: Actor table repositories for superadmins, agents, and hotels
// ABOUTME: Creation validates location references inside one transaction; deletes are soft
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! Actor storage: the three login-capable principal tables.
//!
//! Each actor row stores a unique email and a bcrypt password hash. Agents
//! and hotels may link into the location hierarchy; those references are
//! validated against existing ACTIVE rows inside the same transaction as the
//! insert, so a creation either lands with all its references intact or not
//! at all. Actor deletion is a soft delete (`status = 0`): actor ids are
//! audit-lineage targets (`created_by_id`) of rows they created and must
//! stay resolvable.

use super::transactions::TransactionGuard;
use super::Database;
use crate::errors::{classify_database_error, require_fields, AppError, AppResult};
use crate::models::{
    Agent, AgentPayload, Hotel, HotelPayload, LoginAccount, Superadmin,
};
use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

impl Database {
    /// Create actor tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_actors(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS superadmins (
                superadmin_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                status INTEGER NOT NULL DEFAULT 1,
                created_date DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_date DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS agents (
                agent_id INTEGER PRIMARY KEY AUTOINCREMENT,
                agent_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                phone TEXT,
                country_id INTEGER REFERENCES countries(country_id) ON DELETE RESTRICT,
                state_id INTEGER REFERENCES states(state_id) ON DELETE RESTRICT,
                district_id INTEGER REFERENCES districts(district_id) ON DELETE RESTRICT,
                zone_id INTEGER REFERENCES zones(zone_id) ON DELETE RESTRICT,
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
            CREATE TABLE IF NOT EXISTS hotels (
                hotel_id INTEGER PRIMARY KEY AUTOINCREMENT,
                hotel_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                phone TEXT,
                address TEXT,
                country_id INTEGER REFERENCES countries(country_id) ON DELETE RESTRICT,
                state_id INTEGER REFERENCES states(state_id) ON DELETE RESTRICT,
                district_id INTEGER REFERENCES districts(district_id) ON DELETE RESTRICT,
                zone_id INTEGER REFERENCES zones(zone_id) ON DELETE RESTRICT,
                opening_time TEXT,
                closing_time TEXT,
                gst_number TEXT,
                pan_number TEXT,
                aadhar_number TEXT,
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

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_agents_email ON agents(email)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_hotels_email ON hotels(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ── Login lookups ───────────────────────────────────────────────────

    /// Look up an active superadmin's credential record by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_superadmin_login(&self, email: &str) -> AppResult<Option<LoginAccount>> {
        let row = sqlx::query(
            "SELECT superadmin_id AS id, name, email, password FROM superadmins \
             WHERE email = $1 AND status = 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_login_account))
    }

    /// Look up an active agent's credential record by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_agent_login(&self, email: &str) -> AppResult<Option<LoginAccount>> {
        let row = sqlx::query(
            "SELECT agent_id AS id, agent_name AS name, email, password FROM agents \
             WHERE email = $1 AND status = 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_login_account))
    }

    /// Look up an active hotel's credential record by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_hotel_login(&self, email: &str) -> AppResult<Option<LoginAccount>> {
        let row = sqlx::query(
            "SELECT hotel_id AS id, hotel_name AS name, email, password FROM hotels \
             WHERE email = $1 AND status = 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_login_account))
    }

    fn row_to_login_account(row: &SqliteRow) -> LoginAccount {
        LoginAccount {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password"),
        }
    }

    // ── Superadmins ─────────────────────────────────────────────────────

    /// Count superadmin rows (active or not); gates the bootstrap endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn superadmin_count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM superadmins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Get a superadmin by id (credential hash excluded)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_superadmin(&self, superadmin_id: i64) -> AppResult<Option<Superadmin>> {
        let row = sqlx::query(
            "SELECT superadmin_id, name, email, status, created_date, updated_date \
             FROM superadmins WHERE superadmin_id = $1",
        )
        .bind(superadmin_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(|row| Superadmin {
            superadmin_id: row.get("superadmin_id"),
            name: row.get("name"),
            email: row.get("email"),
            status: row.get("status"),
            created_date: row.get("created_date"),
            updated_date: row.get("updated_date"),
        }))
    }

    /// Insert a superadmin with an already-hashed password
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the email is taken, or a database error
    /// otherwise
    pub async fn create_superadmin(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Superadmin> {
        require_fields(&[("name", name), ("email", email)])?;

        let result = sqlx::query(
            "INSERT INTO superadmins (name, email, password) VALUES ($1, $2, $3)",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Email is already registered",
                "Superadmin references missing records",
            )
        })?;

        self.get_superadmin(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Inserted superadmin row could not be re-read"))
    }

    // ── Agents ──────────────────────────────────────────────────────────

    /// List active agents with their location display names, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_agents(&self) -> AppResult<Vec<Agent>> {
        let rows = sqlx::query(&format!(
            "{AGENT_SELECT} WHERE a.status = 1 ORDER BY a.agent_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_agent).collect())
    }

    /// Get an agent by id with its location display names
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_agent(&self, agent_id: i64) -> AppResult<Option<Agent>> {
        let row = sqlx::query(&format!("{AGENT_SELECT} WHERE a.agent_id = $1"))
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_agent))
    }

    /// Insert an agent after validating its location references, atomically
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or a location reference
    /// that does not resolve to an active row, a conflict error for a taken
    /// email, or a database error otherwise
    pub async fn create_agent(
        &self,
        payload: &AgentPayload,
        password_hash: &str,
        created_by: Option<i64>,
    ) -> AppResult<Agent> {
        require_fields(&[
            ("agent_name", &payload.agent_name),
            ("email", &payload.email),
        ])?;

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        Self::ensure_location_refs(
            guard.executor()?,
            payload.country_id,
            payload.state_id,
            payload.district_id,
            payload.zone_id,
        )
        .await?;

        let result = sqlx::query(
            r"
            INSERT INTO agents (
                agent_name, email, password, phone,
                country_id, state_id, district_id, zone_id,
                status, created_by_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&payload.agent_name)
        .bind(&payload.email)
        .bind(password_hash)
        .bind(&payload.phone)
        .bind(payload.country_id)
        .bind(payload.state_id)
        .bind(payload.district_id)
        .bind(payload.zone_id)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(guard.executor()?)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Email is already registered",
                "Referenced location does not exist",
            )
        })?;

        let agent_id = result.last_insert_rowid();
        guard.commit().await?;

        self.get_agent(agent_id)
            .await?
            .ok_or_else(|| AppError::internal("Inserted agent row could not be re-read"))
    }

    /// Full-column update of an agent. The stored password hash is replaced
    /// only when a new one is supplied.
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, the same classifications as
    /// create, or a database error otherwise
    pub async fn update_agent(
        &self,
        agent_id: i64,
        payload: &AgentPayload,
        password_hash: Option<&str>,
        updated_by: Option<i64>,
    ) -> AppResult<Agent> {
        require_fields(&[
            ("agent_name", &payload.agent_name),
            ("email", &payload.email),
        ])?;

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        Self::ensure_location_refs(
            guard.executor()?,
            payload.country_id,
            payload.state_id,
            payload.district_id,
            payload.zone_id,
        )
        .await?;

        let result = sqlx::query(
            r"
            UPDATE agents SET
                agent_name = $2,
                email = $3,
                phone = $4,
                country_id = $5,
                state_id = $6,
                district_id = $7,
                zone_id = $8,
                status = $9,
                updated_by_id = $10,
                updated_date = CURRENT_TIMESTAMP,
                password = COALESCE($11, password)
            WHERE agent_id = $1
            ",
        )
        .bind(agent_id)
        .bind(&payload.agent_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.country_id)
        .bind(payload.state_id)
        .bind(payload.district_id)
        .bind(payload.zone_id)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .bind(password_hash)
        .execute(guard.executor()?)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Email is already registered",
                "Referenced location does not exist",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Agent"));
        }

        guard.commit().await?;

        self.get_agent(agent_id)
            .await?
            .ok_or_else(|| AppError::not_found("Agent"))
    }

    /// Soft-delete an agent (`status = 0`)
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve
    pub async fn soft_delete_agent(&self, agent_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE agents SET status = 0, updated_date = CURRENT_TIMESTAMP WHERE agent_id = $1",
        )
        .bind(agent_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Agent"));
        }
        Ok(())
    }

    fn row_to_agent(row: &SqliteRow) -> Agent {
        Agent {
            agent_id: row.get("agent_id"),
            agent_name: row.get("agent_name"),
            email: row.get("email"),
            phone: row.get("phone"),
            country_id: row.get("country_id"),
            state_id: row.get("state_id"),
            district_id: row.get("district_id"),
            zone_id: row.get("zone_id"),
            country_name: row.get("country_name"),
            state_name: row.get("state_name"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }

    // ── Hotels ──────────────────────────────────────────────────────────

    /// List active hotels with their location display names, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_hotels(&self) -> AppResult<Vec<Hotel>> {
        let rows = sqlx::query(&format!(
            "{HOTEL_SELECT} WHERE h.status = 1 ORDER BY h.hotel_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_hotel).collect())
    }

    /// Get a hotel by id with its location display names
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_hotel(&self, hotel_id: i64) -> AppResult<Option<Hotel>> {
        let row = sqlx::query(&format!("{HOTEL_SELECT} WHERE h.hotel_id = $1"))
            .bind(hotel_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_hotel))
    }

    /// Insert a hotel after validating its location references, atomically
    ///
    /// # Errors
    ///
    /// Same classifications as [`Database::create_agent`]
    pub async fn create_hotel(
        &self,
        payload: &HotelPayload,
        password_hash: &str,
        created_by: Option<i64>,
    ) -> AppResult<Hotel> {
        require_fields(&[
            ("hotel_name", &payload.hotel_name),
            ("email", &payload.email),
        ])?;

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        Self::ensure_location_refs(
            guard.executor()?,
            payload.country_id,
            payload.state_id,
            payload.district_id,
            payload.zone_id,
        )
        .await?;

        let result = sqlx::query(
            r"
            INSERT INTO hotels (
                hotel_name, email, password, phone, address,
                country_id, state_id, district_id, zone_id,
                opening_time, closing_time,
                gst_number, pan_number, aadhar_number,
                status, created_by_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(&payload.hotel_name)
        .bind(&payload.email)
        .bind(password_hash)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(payload.country_id)
        .bind(payload.state_id)
        .bind(payload.district_id)
        .bind(payload.zone_id)
        .bind(&payload.opening_time)
        .bind(&payload.closing_time)
        .bind(&payload.gst_number)
        .bind(&payload.pan_number)
        .bind(&payload.aadhar_number)
        .bind(payload.status.unwrap_or(1))
        .bind(created_by)
        .execute(guard.executor()?)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Email is already registered",
                "Referenced location does not exist",
            )
        })?;

        let hotel_id = result.last_insert_rowid();
        guard.commit().await?;

        self.get_hotel(hotel_id)
            .await?
            .ok_or_else(|| AppError::internal("Inserted hotel row could not be re-read"))
    }

    /// Full-column update of a hotel; password semantics match agents
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve, the same classifications as
    /// create, or a database error otherwise
    pub async fn update_hotel(
        &self,
        hotel_id: i64,
        payload: &HotelPayload,
        password_hash: Option<&str>,
        updated_by: Option<i64>,
    ) -> AppResult<Hotel> {
        require_fields(&[
            ("hotel_name", &payload.hotel_name),
            ("email", &payload.email),
        ])?;

        let tx = self.pool.begin().await.map_err(AppError::from)?;
        let mut guard = TransactionGuard::new(tx);

        Self::ensure_location_refs(
            guard.executor()?,
            payload.country_id,
            payload.state_id,
            payload.district_id,
            payload.zone_id,
        )
        .await?;

        let result = sqlx::query(
            r"
            UPDATE hotels SET
                hotel_name = $2,
                email = $3,
                phone = $4,
                address = $5,
                country_id = $6,
                state_id = $7,
                district_id = $8,
                zone_id = $9,
                opening_time = $10,
                closing_time = $11,
                gst_number = $12,
                pan_number = $13,
                aadhar_number = $14,
                status = $15,
                updated_by_id = $16,
                updated_date = CURRENT_TIMESTAMP,
                password = COALESCE($17, password)
            WHERE hotel_id = $1
            ",
        )
        .bind(hotel_id)
        .bind(&payload.hotel_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(payload.country_id)
        .bind(payload.state_id)
        .bind(payload.district_id)
        .bind(payload.zone_id)
        .bind(&payload.opening_time)
        .bind(&payload.closing_time)
        .bind(&payload.gst_number)
        .bind(&payload.pan_number)
        .bind(&payload.aadhar_number)
        .bind(payload.status.unwrap_or(1))
        .bind(updated_by)
        .bind(password_hash)
        .execute(guard.executor()?)
        .await
        .map_err(|e| {
            classify_database_error(
                e,
                "Email is already registered",
                "Referenced location does not exist",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Hotel"));
        }

        guard.commit().await?;

        self.get_hotel(hotel_id)
            .await?
            .ok_or_else(|| AppError::not_found("Hotel"))
    }

    /// Soft-delete a hotel (`status = 0`)
    ///
    /// # Errors
    ///
    /// Returns 404 if the id does not resolve
    pub async fn soft_delete_hotel(&self, hotel_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE hotels SET status = 0, updated_date = CURRENT_TIMESTAMP WHERE hotel_id = $1",
        )
        .bind(hotel_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Hotel"));
        }
        Ok(())
    }

    fn row_to_hotel(row: &SqliteRow) -> Hotel {
        Hotel {
            hotel_id: row.get("hotel_id"),
            hotel_name: row.get("hotel_name"),
            email: row.get("email"),
            phone: row.get("phone"),
            address: row.get("address"),
            country_id: row.get("country_id"),
            state_id: row.get("state_id"),
            district_id: row.get("district_id"),
            zone_id: row.get("zone_id"),
            country_name: row.get("country_name"),
            state_name: row.get("state_name"),
            opening_time: row.get("opening_time"),
            closing_time: row.get("closing_time"),
            gst_number: row.get("gst_number"),
            pan_number: row.get("pan_number"),
            aadhar_number: row.get("aadhar_number"),
            status: row.get("status"),
            created_by_id: row.get("created_by_id"),
            created_date: row.get("created_date"),
            updated_by_id: row.get("updated_by_id"),
            updated_date: row.get("updated_date"),
        }
    }

    // ── Shared validation ───────────────────────────────────────────────

    /// Verify that every supplied location reference resolves to an existing
    /// ACTIVE row, within the caller's open transaction
    async fn ensure_location_refs(
        conn: &mut SqliteConnection,
        country_id: Option<i64>,
        state_id: Option<i64>,
        district_id: Option<i64>,
        zone_id: Option<i64>,
    ) -> AppResult<()> {
        let refs: [(&str, &str, Option<i64>); 4] = [
            ("countries", "country_id", country_id),
            ("states", "state_id", state_id),
            ("districts", "district_id", district_id),
            ("zones", "zone_id", zone_id),
        ];

        for (table, column, id) in refs {
            let Some(id) = id else { continue };

            let query = format!("SELECT 1 FROM {table} WHERE {column} = $1 AND status = 1");
            let found: Option<i64> = sqlx::query_scalar(&query)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(AppError::from)?;

            if found.is_none() {
                return Err(AppError::invalid_input(format!(
                    "Referenced {column} {id} does not exist or is inactive"
                )));
            }
        }

        Ok(())
    }
}

/// Shared SELECT prefix for agent reads with location display names
const AGENT_SELECT: &str = r"
    SELECT a.agent_id, a.agent_name, a.email, a.phone,
           a.country_id, a.state_id, a.district_id, a.zone_id,
           a.status, a.created_by_id, a.created_date, a.updated_by_id, a.updated_date,
           c.country_name, s.state_name
    FROM agents a
    LEFT JOIN countries c ON c.country_id = a.country_id
    LEFT JOIN states s ON s.state_id = a.state_id
";

/// Shared SELECT prefix for hotel reads with location display names
const HOTEL_SELECT: &str = r"
    SELECT h.hotel_id, h.hotel_name, h.email, h.phone, h.address,
           h.country_id, h.state_id, h.district_id, h.zone_id,
           h.opening_time, h.closing_time, h.gst_number, h.pan_number, h.aadhar_number,
           h.status, h.created_by_id, h.created_date, h.updated_by_id, h.updated_date,
           c.country_name, s.state_name
    FROM hotels h
    LEFT JOIN countries c ON c.country_id = h.country_id
    LEFT JOIN states s ON s.state_id = h.state_id
";
