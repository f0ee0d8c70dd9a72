//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;
use validator::ValidationErrors;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request input failed its schema
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// Password rejected by the hashing policy (control characters, whitespace only, ...)
    #[error("{0}")]
    PasswordPolicy(String),

    #[error("This email is already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    /// Wrong password, or an account without a local password
    #[error("Incorrect password")]
    InvalidCredentials,

    /// OAuth callback reached without `code`
    #[error("Authorization code not provided")]
    MissingAuthorizationCode,

    /// External identity provider failure (token exchange, userinfo)
    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::PasswordPolicy(_)
            | AuthError::MissingAuthorizationCode => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::IdentityProvider(_)
            | AuthError::Token(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::from(errors),
            AuthError::Database(err) => AppError::from(err),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::IdentityProvider(msg) => {
                tracing::error!(message = %msg, "Identity provider error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::EmailTaken.kind().status_code(), 409);
        assert_eq!(AuthError::UserNotFound.kind().status_code(), 404);
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::MissingAuthorizationCode.kind().status_code(), 400);
        assert_eq!(
            AuthError::Internal("boom".into()).kind().status_code(),
            500
        );
    }

    #[test]
    fn test_validation_keeps_field_details() {
        let mut errors = ValidationErrors::new();
        errors.add("email", validator::ValidationError::new("email"));

        let app_error = AuthError::Validation(errors).into_app_error();
        assert_eq!(app_error.status_code(), 400);
        assert!(app_error.details().is_some());
    }
}
