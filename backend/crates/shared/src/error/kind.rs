//! Error Kind
//!
//! The closed set of outcomes an endpoint can fail with.

use serde::Serialize;

/// Failure category, one per HTTP status this API answers with.
///
/// Domain crates classify their own error enums into these; the response
/// layer never looks past the kind.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert_eq!(ErrorKind::Conflict.to_string(), "Conflict");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Schema, range or format problems in the request
    BadRequest,
    /// Token missing or rejected, or wrong password
    Unauthorized,
    /// Absent, or owned by another user
    NotFound,
    /// Duplicate email, or a week that is already completed
    Conflict,
    InternalServerError,
}

impl ErrorKind {
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalServerError => 500,
        }
    }

    /// Reason phrase of the status code
    pub const fn reason(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
            Self::Conflict => "Conflict",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    /// Server-side failures get logged and a generic body
    pub const fn is_server_error(self) -> bool {
        matches!(self, Self::InternalServerError)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_internal_is_server_side() {
        let client = [
            ErrorKind::BadRequest,
            ErrorKind::Unauthorized,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
        ];
        for kind in client {
            assert!((400..500).contains(&kind.status_code()), "{kind}");
            assert!(!kind.is_server_error());
        }
        assert!(ErrorKind::InternalServerError.is_server_error());
    }

    #[test]
    fn test_serializes_screaming_snake() {
        let json = serde_json::to_value(ErrorKind::NotFound).unwrap();
        assert_eq!(json, "NOT_FOUND");
    }
}
