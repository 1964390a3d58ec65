// ABOUTME: Unified error handling with standard error codes and HTTP response formatting
// ABOUTME: Classifies database driver errors into the domain taxonomy at repository boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! # Unified Error Handling System
//!
//! This module provides a centralized error handling system for the Innkeeper
//! server. It defines standard error types, error codes, and HTTP response
//! formatting to ensure consistent error handling across all modules and
//! endpoints. Repository and coordinator operations classify raw sqlx errors
//! here before anything reaches the HTTP layer, so no handler ever sees an
//! unclassified driver failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired = 1002,
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1003,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Resource management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "DUPLICATE_VALUE")]
    DuplicateValue = 4001,
    #[serde(rename = "DEPENDENT_ROWS_EXIST")]
    DependentRowsExist = 4002,

    // Internal errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // 400 Bad Request: validation failures, unique-constraint conflicts,
            // and foreign-key dependents are all client-correctable
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::DuplicateValue
            | Self::DependentRowsExist => 400,

            // 401 Unauthorized
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired => 401,

            // 403 Forbidden
            Self::PermissionDenied => 403,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::AuthExpired => "The authentication token has expired",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::DuplicateValue => "A resource with this value already exists",
            Self::DependentRowsExist => "The resource has associated records and cannot be removed",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Raw driver detail, surfaced for diagnostics on 500s
    pub details: Option<String>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach driver or context detail to the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format: `{"error": {"code", "message", "details?"}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details: error.details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Invalid authentication
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Authentication expired
    pub fn auth_expired() -> Self {
        Self::new(ErrorCode::AuthExpired, "Authentication token has expired")
    }

    /// Insufficient role for the requested operation
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Unique-constraint conflict with a field-specific message
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateValue, message)
    }

    /// Foreign-key dependents block the operation
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DependentRowsExist, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

/// Conversion from raw sqlx errors for plain (non-write) query paths.
///
/// Write paths that can hit unique or foreign-key constraints should use
/// [`classify_database_error`] instead, which produces field-specific 400s.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::not_found("Row"),
            other => Self::database("Database operation failed").with_details(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Classify a sqlx error raised by a write statement into the domain taxonomy.
///
/// - unique-constraint violation → [`ErrorCode::DuplicateValue`] with the
///   caller-supplied, field-specific `on_conflict` message
/// - foreign-key violation → [`ErrorCode::DependentRowsExist`] with the
///   caller-supplied `on_foreign_key` message
/// - anything else → [`ErrorCode::DatabaseError`] with the raw driver message
///   preserved in `details`
#[must_use]
pub fn classify_database_error(
    error: sqlx::Error,
    on_conflict: &str,
    on_foreign_key: &str,
) -> AppError {
    match &error {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => AppError::duplicate(on_conflict),
            sqlx::error::ErrorKind::ForeignKeyViolation => AppError::dependency(on_foreign_key),
            _ => AppError::database("Database operation failed")
                .with_details(db_err.message().to_owned()),
        },
        sqlx::Error::RowNotFound => AppError::not_found("Row"),
        other => AppError::database("Database operation failed").with_details(other.to_string()),
    }
}

/// Validate that every listed required field is present and non-empty.
///
/// Returns a single 400 naming all missing fields, so a client fixing a
/// request sees the complete list at once.
///
/// # Errors
///
/// Returns [`ErrorCode::MissingRequiredField`] when any `(name, value)` pair
/// has an empty or whitespace-only value.
pub fn require_fields(fields: &[(&str, &str)]) -> AppResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field(s): {}", missing.join(", ")),
        ))
    }
}

/// Validate that a required numeric reference (foreign key) was supplied.
///
/// # Errors
///
/// Returns [`ErrorCode::MissingRequiredField`] naming `field` when `value`
/// is `None`.
pub fn require_id(field: &str, value: Option<i64>) -> AppResult<i64> {
    value.ok_or_else(|| {
        AppError::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field(s): {field}"),
        )
    })
}
