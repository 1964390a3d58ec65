// ABOUTME: JWT-based actor authentication for superadmin, agent, and hotel logins
// ABOUTME: Handles token generation, validation, and role claims
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

//! # Authentication and Session Management
//!
//! This module issues and validates the HS256 JWTs used by the three login
//! flows. A token carries the actor's id, email, display name, and role;
//! the role decides which protected routes accept the token.

use crate::errors::{AppError, AppResult};
use crate::models::LoginAccount;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// The three login-capable principal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Superadmin,
    Agent,
    Hotel,
}

impl ActorRole {
    /// Role claim string embedded in tokens
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Agent => "agent",
            Self::Hotel => "hotel",
        }
    }
}

impl std::str::FromStr for ActorRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Self::Superadmin),
            "agent" => Ok(Self::Agent),
            "hotel" => Ok(Self::Hotel),
            other => Err(AppError::auth_invalid(format!("Unknown role: {other}"))),
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `JWT` claims for actor authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Actor id within its own table
    pub sub: String,
    /// Actor email
    pub email: String,
    /// Actor display name
    pub name: String,
    /// Actor role (`superadmin`, `agent`, `hotel`)
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim back into a numeric actor id
    ///
    /// # Errors
    ///
    /// Returns an auth error if the subject is not a valid integer id
    pub fn actor_id(&self) -> AppResult<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::auth_invalid("Invalid actor id in token"))
    }

    /// Parse the role claim
    ///
    /// # Errors
    ///
    /// Returns an auth error if the role string is not one of the three roles
    pub fn actor_role(&self) -> AppResult<ActorRole> {
        self.role.parse()
    }
}

/// Authentication manager for actor `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from the configured signing secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// When a token generated right now will expire
    #[must_use]
    pub fn token_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Generate an HS256 `JWT` for a logged-in actor
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails due to invalid claims
    pub fn generate_token(&self, account: &LoginAccount, role: ActorRole) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: account.id.to_string(),
            email: account.email.clone(),
            name: account.name.clone(),
            role: role.as_str().to_owned(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` for an expired token and `AUTH_INVALID` for a
    /// bad signature, malformed token, or undecodable claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    tracing::debug!("Rejected expired JWT");
                    Err(AppError::auth_expired())
                }
                other => {
                    tracing::debug!("Rejected invalid JWT: {other:?}");
                    Err(AppError::auth_invalid("Invalid authentication token"))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account() -> LoginAccount {
        LoginAccount {
            id: 7,
            name: "Test Agent".into(),
            email: "agent@example.com".into(),
            password_hash: "irrelevant".into(),
        }
    }

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret", 24)
    }

    #[test]
    fn test_generate_and_validate_token() {
        let manager = test_manager();
        let token = manager
            .generate_token(&test_account(), ActorRole::Agent)
            .unwrap();
        assert!(!token.is_empty());

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "agent@example.com");
        assert_eq!(claims.actor_id().unwrap(), 7);
        assert_eq!(claims.actor_role().unwrap(), ActorRole::Agent);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_validate_rejects_tampered_token() {
        let manager = test_manager();
        let token = manager
            .generate_token(&test_account(), ActorRole::Hotel)
            .unwrap();

        let other = AuthManager::new(b"different-secret", 24);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let manager = test_manager();
        assert!(manager.validate_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_expired_token_maps_to_auth_expired() {
        let manager = AuthManager::new(b"test-secret", -1);
        let token = manager
            .generate_token(&test_account(), ActorRole::Superadmin)
            .unwrap();

        let err = test_manager().validate_token(&token).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthExpired);
    }
}
