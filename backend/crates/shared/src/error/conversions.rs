//! Conversions into [`AppError`] from the libraries the crates share.

use super::app_error::AppError;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            AppError::internal("JSON serialization error").with_source(err)
        } else {
            AppError::bad_request("Invalid JSON body").with_source(err)
        }
    }
}

/// Field diagnostics become the `"details"` map, keyed by camelCase wire names
#[cfg(feature = "validator")]
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::from_validation(err, camel_case)
    }
}

#[cfg(feature = "validator")]
impl AppError {
    /// Like the `From` impl, with the caller choosing each field's wire name.
    /// Nested struct and list errors are renamed too.
    pub fn from_validation<F>(err: validator::ValidationErrors, wire_name: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let details = serde_json::to_value(&err)
            .map(|value| rename_fields(value, &wire_name))
            .unwrap_or(serde_json::Value::Null);
        AppError::bad_request("Validation failed")
            .with_details(details)
            .with_source(err)
    }
}

/// Field errors are arrays and keep their keys; only map keys are fields
#[cfg(feature = "validator")]
fn rename_fields<F>(value: serde_json::Value, wire_name: &F) -> serde_json::Value
where
    F: Fn(&str) -> String,
{
    match value {
        serde_json::Value::Object(fields) => fields
            .into_iter()
            .map(|(field, nested)| (wire_name(&field), rename_fields(nested, wire_name)))
            .collect(),
        other => other,
    }
}

/// `date_format` -> `dateFormat`
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Persistence failures are always the server's fault here: constraint
/// violations the caller can cause are mapped by each repository first.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let message = match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                "Database unavailable"
            }
            _ => "Database error",
        };
        AppError::internal(message).with_source(err)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_body())).into_response()
    }
}
