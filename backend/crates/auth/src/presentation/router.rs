//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use platform::bearer::require_bearer;
use platform::token::TokenCodec;
use std::sync::Arc;

use crate::application::config::{AuthConfig, GoogleConfig};
use crate::domain::identity::IdentityProvider;
use crate::domain::repository::UserRepository;
use crate::infra::google::GoogleIdentityProvider;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState, GoogleAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, tokens: Arc<TokenCodec>, config: AuthConfig) -> Router {
    auth_router_generic(repo, tokens, config)
}

/// Create a generic Auth router for any repository implementation
///
/// Mounts `POST /user`, `POST /userLogin` and the bearer-protected
/// `/user/profile` and `/user/password` routes.
pub fn auth_router_generic<R>(repo: R, tokens: Arc<TokenCodec>, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route(
            "/user/profile",
            get(handlers::get_profile::<R>)
                .put(handlers::update_profile::<R>)
                .delete(handlers::delete_profile::<R>),
        )
        .route("/user/password", put(handlers::change_password::<R>))
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer));

    Router::new()
        .route("/user", post(handlers::sign_up::<R>))
        .route("/userLogin", post(handlers::sign_in::<R>))
        .merge(protected)
        .with_state(state)
}

/// Create the Google sign-in router with PostgreSQL repository
pub fn google_router(
    repo: PgUserRepository,
    tokens: Arc<TokenCodec>,
    config: AuthConfig,
    google: GoogleConfig,
) -> Router {
    let provider = GoogleIdentityProvider::new(google.clone());
    google_router_generic(repo, provider, tokens, config, google)
}

/// Create a generic external identity router (`/api/auth/google[/callback]`)
pub fn google_router_generic<R, P>(
    repo: R,
    provider: P,
    tokens: Arc<TokenCodec>,
    config: AuthConfig,
    google: GoogleConfig,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let state = GoogleAppState {
        repo: Arc::new(repo),
        provider: Arc::new(provider),
        tokens,
        config: Arc::new(config),
        google: Arc::new(google),
    };

    Router::new()
        .route("/api/auth/google", get(handlers::google_redirect::<R, P>))
        .route(
            "/api/auth/google/callback",
            get(handlers::google_callback::<R, P>),
        )
        .with_state(state)
}
