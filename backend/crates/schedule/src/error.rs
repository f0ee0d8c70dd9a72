//! Schedule Error Types
//!
//! Schedule-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Resources owned by another user are
//! reported exactly like missing ones.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::camel_case, kind::ErrorKind};
use thiserror::Error;
use validator::ValidationErrors;

/// Schedule-specific result type alias
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Request field name for a validated input field
fn wire_field(field: &str) -> String {
    match field {
        "activity_type" => "type".to_string(),
        other => camel_case(other),
    }
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Request input failed its schema
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// `startDate` not strictly before `endDate`
    #[error("startDate must be before endDate")]
    InvalidRange,

    #[error("dayOfWeek must be between 0 and 6")]
    InvalidDayOfWeek,

    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Week not found")]
    WeekNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// Token still valid but the account is gone
    #[error("User not found")]
    UserNotFound,

    /// Completed weeks cannot be reactivated
    #[error("Week is already completed")]
    WeekAlreadyCompleted,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScheduleError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::Validation(_)
            | ScheduleError::InvalidRange
            | ScheduleError::InvalidDayOfWeek => ErrorKind::BadRequest,
            ScheduleError::ActivityNotFound
            | ScheduleError::WeekNotFound
            | ScheduleError::CommentNotFound
            | ScheduleError::UserNotFound => ErrorKind::NotFound,
            ScheduleError::WeekAlreadyCompleted => ErrorKind::Conflict,
            ScheduleError::Database(_) | ScheduleError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            ScheduleError::Validation(errors) => AppError::from_validation(errors, wire_field),
            ScheduleError::Database(err) => AppError::from(err),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ScheduleError::Database(e) => {
                tracing::error!(error = %e, "Schedule database error");
            }
            ScheduleError::Internal(msg) => {
                tracing::error!(message = %msg, "Schedule internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Schedule error");
            }
        }
    }
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
