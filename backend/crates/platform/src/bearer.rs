//! Bearer-token middleware
//!
//! Resolves `Authorization: Bearer <token>` into a [`Caller`] request
//! extension. Handlers take `Caller` as an extractor.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use kernel::error::app_error::AppError;
use kernel::id::UserId;

use crate::token::TokenCodec;

pub const TOKEN_NOT_PROVIDED: &str = "Token not provided";
pub const INVALID_TOKEN: &str = "Invalid token";

/// The authenticated identity of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub email: String,
}

/// Middleware that requires a valid bearer token.
///
/// Use with `axum::middleware::from_fn_with_state(codec, require_bearer)`.
pub async fn require_bearer(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(req.headers()) else {
        tracing::debug!("Request without bearer token");
        return Err(AppError::unauthorized(TOKEN_NOT_PROVIDED));
    };

    let claims = codec.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Bearer token rejected");
        AppError::unauthorized(INVALID_TOKEN)
    })?;

    req.extensions_mut().insert(Caller {
        user_id: claims.user_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(TOKEN_NOT_PROVIDED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Router, middleware};
    use std::time::Duration;
    use tower::ServiceExt;

    async fn whoami(caller: Caller) -> String {
        caller.email
    }

    fn app(codec: Arc<TokenCodec>) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .layer(middleware::from_fn_with_state(codec, require_bearer))
    }

    fn request(authorization: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header() {
        let codec = Arc::new(TokenCodec::new("secret").unwrap());
        let response = app(codec).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains(TOKEN_NOT_PROVIDED));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme() {
        let codec = Arc::new(TokenCodec::new("secret").unwrap());
        let response = app(codec)
            .oneshot(request(Some("Basic YWxhZGRpbjpvcGVu")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains(TOKEN_NOT_PROVIDED));
    }

    #[tokio::test]
    async fn test_invalid_token() {
        let codec = Arc::new(TokenCodec::new("secret").unwrap());
        let response = app(codec)
            .oneshot(request(Some("Bearer garbage")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains(INVALID_TOKEN));
    }

    #[tokio::test]
    async fn test_valid_token_sets_caller() {
        let codec = Arc::new(TokenCodec::new("secret").unwrap());
        let token = codec
            .issue(UserId::new(), "ann@x.com", Duration::from_secs(60))
            .unwrap();

        let response = app(codec)
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ann@x.com");
    }
}
