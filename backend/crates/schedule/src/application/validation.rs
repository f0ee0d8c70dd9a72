//! Field validators shared by the use-case inputs
//!
//! Each parser doubles as a `validator` custom function, so the same rule
//! produces the field diagnostic and the typed value.

use chrono::{DateTime, NaiveDate, Utc};
use validator::{ValidationError, ValidationErrors};

use crate::domain::value_objects::ActivityType;
use crate::error::ScheduleError;

pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::new("date").with_message("Expected a YYYY-MM-DD date".into()))
}

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            ValidationError::new("datetime").with_message("Expected an RFC 3339 date-time".into())
        })
}

pub fn parse_activity_type(value: &str) -> Result<ActivityType, ValidationError> {
    value.parse().map_err(|_| {
        ValidationError::new("activity_type")
            .with_message("Expected PESSOAL, TRABALHO, ESTUDO, SAUDE or OUTRO".into())
    })
}

pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ())
}

pub fn validate_instant(value: &str) -> Result<(), ValidationError> {
    parse_instant(value).map(|_| ())
}

pub fn validate_activity_type(value: &str) -> Result<(), ValidationError> {
    parse_activity_type(value).map(|_| ())
}

/// Wrap a single field failure as a validation error
pub fn field_error(field: &'static str, error: ValidationError) -> ScheduleError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    ScheduleError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-01-01").is_ok());
        assert!(parse_date("01/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_instant() {
        let instant = parse_instant("2024-01-01T10:00:00-03:00").unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-01T13:00:00+00:00");
        assert!(parse_instant("2024-01-01").is_err());
    }

    #[test]
    fn test_field_error_shape() {
        let err = field_error("date", ValidationError::new("date"));
        match err {
            ScheduleError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("date"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
