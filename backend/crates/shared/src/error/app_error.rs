//! Application Error
//!
//! [`AppError`] is what every handler finally answers with. It renders as
//! `{ "error": ... }`, plus `"details"` for field diagnostics.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Message rendered for every 5xx response
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Unified error at the HTTP boundary.
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "Week not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.to_body()["error"], "Week not found");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    details: Option<serde_json::Value>,
    /// Kept for logs, never rendered
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    /// Response body; 5xx bodies are always [`GENERIC_SERVER_ERROR`]
    pub fn to_body(&self) -> serde_json::Value {
        if self.kind.is_server_error() {
            return serde_json::json!({ "error": GENERIC_SERVER_ERROR });
        }

        let mut body = serde_json::json!({ "error": self.message() });
        if let Some(details) = &self.details {
            body["details"] = details.clone();
        }
        body
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("details", &self.details)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_kind() {
        let err = AppError::new(ErrorKind::Conflict, "Week is already completed");
        assert_eq!(err.to_string(), "[Conflict] Week is already completed");
    }

    #[test]
    fn test_source_is_kept() {
        let err = AppError::internal("write failed").with_source(std::io::Error::other("disk"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_client_body() {
        let body = AppError::unauthorized("Token not provided").to_body();
        assert_eq!(body, serde_json::json!({ "error": "Token not provided" }));
    }

    #[test]
    fn test_body_includes_details() {
        let body = AppError::bad_request("Validation failed")
            .with_details(serde_json::json!({ "title": [{ "code": "length" }] }))
            .to_body();
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"]["title"][0]["code"], "length");
    }

    #[test]
    fn test_server_body_is_generic() {
        let body = AppError::internal("connection refused on 10.0.0.3")
            .with_details(serde_json::json!({ "host": "10.0.0.3" }))
            .to_body();
        assert_eq!(body, serde_json::json!({ "error": GENERIC_SERVER_ERROR }));
    }
}
