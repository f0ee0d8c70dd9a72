//! API application
//!
//! Composes the auth and schedule routers into one service. `main.rs` wires
//! the Postgres-backed stores; tests drive [`app_router_generic`] with the
//! in-memory ones.

pub mod accounts;
pub mod config;

use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::repository::UserRepository;
use axum::{Json, Router, routing::get};
use kernel::envelope::Envelope;
use platform::token::TokenCodec;
use schedule::presentation::handlers::ScheduleStore;
use serde::Serialize;

pub use accounts::AccountDirectory;
pub use config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

/// GET /health
async fn health() -> Json<Envelope<Health>> {
    Json(Envelope::new(Health { status: "ok" }))
}

/// Build the full application router for any store implementations
///
/// Schedule sees accounts through the same user store auth writes to.
pub fn app_router_generic<U, S>(
    users: U,
    schedule: S,
    tokens: Arc<TokenCodec>,
    config: AuthConfig,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: ScheduleStore,
{
    Router::new()
        .route("/health", get(health))
        .merge(auth::auth_router_generic(users.clone(), tokens.clone(), config))
        .merge(schedule::schedule_router_generic(
            schedule,
            AccountDirectory(users),
            tokens,
        ))
}
