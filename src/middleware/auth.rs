// ABOUTME: Request authentication middleware for protected admin routes
// ABOUTME: Verifies Bearer tokens and exposes decoded claims to handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Innkeeper Systems

use crate::auth::{ActorRole, AuthManager, Claims};
use crate::errors::{AppError, AppResult};
use axum::http::HeaderMap;

/// Middleware verifying `Authorization: Bearer` tokens on protected routes.
///
/// Route handlers call [`AdminAuthMiddleware::authenticate_request`] at the
/// top of each protected handler and receive the decoded [`Claims`], which
/// carry the acting principal's id and role for audit columns.
#[derive(Clone)]
pub struct AdminAuthMiddleware {
    auth_manager: AuthManager,
}

impl AdminAuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: AuthManager) -> Self {
        Self { auth_manager }
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns a 401 error if the header is missing, is not a Bearer token,
    /// or carries an invalid or expired token
    #[tracing::instrument(
        skip(self, auth_header),
        fields(actor_id = tracing::field::Empty, role = tracing::field::Empty)
    )]
    pub fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<Claims> {
        let Some(header) = auth_header else {
            tracing::warn!("Authentication failed: missing authorization header");
            return Err(AppError::auth_required());
        };

        let Some(token) = header.strip_prefix("Bearer ") else {
            tracing::warn!("Authentication failed: authorization header is not a Bearer token");
            return Err(AppError::auth_invalid(
                "Invalid authorization header format - must be 'Bearer <token>'",
            ));
        };

        let claims = self.auth_manager.validate_token(token)?;
        tracing::Span::current()
            .record("actor_id", claims.sub.as_str())
            .record("role", claims.role.as_str());

        Ok(claims)
    }

    /// Authenticate a request from its header map
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::authenticate_request`]
    pub fn authenticate_headers(&self, headers: &HeaderMap) -> AppResult<Claims> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        self.authenticate_request(auth_header)
    }

    /// Require that the authenticated actor holds one of the given roles
    ///
    /// # Errors
    ///
    /// Returns a 403 error when the role claim is valid but not allowed here
    pub fn require_role(claims: &Claims, allowed: &[ActorRole]) -> AppResult<()> {
        let role = claims.actor_role()?;
        if allowed.contains(&role) {
            Ok(())
        } else {
            tracing::warn!(
                actor_id = %claims.sub,
                role = %claims.role,
                "Actor role not permitted for this operation"
            );
            Err(AppError::permission_denied(format!(
                "Role '{role}' may not perform this operation"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginAccount;

    fn middleware() -> AdminAuthMiddleware {
        AdminAuthMiddleware::new(AuthManager::new(b"mw-secret", 24))
    }

    fn token(role: ActorRole) -> String {
        let account = LoginAccount {
            id: 3,
            name: "Admin".into(),
            email: "admin@example.com".into(),
            password_hash: String::new(),
        };
        AuthManager::new(b"mw-secret", 24)
            .generate_token(&account, role)
            .unwrap()
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let err = middleware().authenticate_request(None).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthRequired);
    }

    #[test]
    fn test_non_bearer_header_is_rejected() {
        let err = middleware()
            .authenticate_request(Some("Basic dXNlcjpwYXNz"))
            .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_valid_bearer_token_authenticates() {
        let header = format!("Bearer {}", token(ActorRole::Superadmin));
        let claims = middleware()
            .authenticate_request(Some(&header))
            .unwrap();
        assert_eq!(claims.actor_id().unwrap(), 3);
    }

    #[test]
    fn test_role_guard() {
        let header = format!("Bearer {}", token(ActorRole::Hotel));
        let claims = middleware().authenticate_request(Some(&header)).unwrap();

        assert!(AdminAuthMiddleware::require_role(&claims, &[ActorRole::Hotel]).is_ok());
        let err = AdminAuthMiddleware::require_role(&claims, &[ActorRole::Superadmin])
            .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::PermissionDenied);
    }
}
