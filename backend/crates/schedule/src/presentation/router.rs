//! Schedule Router

use axum::{
    Router, middleware,
    routing::{get, patch, put},
};
use platform::bearer::require_bearer;
use platform::token::TokenCodec;
use std::sync::Arc;

use crate::domain::repository::UserDirectory;
use crate::infra::postgres::PgScheduleRepository;
use crate::presentation::handlers::{self, ScheduleAppState, ScheduleStore, StatsAppState};

/// Create the Schedule router with PostgreSQL repository
///
/// Account existence is read from the same database.
pub fn schedule_router(repo: PgScheduleRepository, tokens: Arc<TokenCodec>) -> Router {
    schedule_router_generic(repo.clone(), repo, tokens)
}

/// Create a generic Schedule router for any repository implementation
///
/// Every route requires a bearer token.
pub fn schedule_router_generic<R, D>(repo: R, directory: D, tokens: Arc<TokenCodec>) -> Router
where
    R: ScheduleStore,
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let stats_state = StatsAppState {
        repo: repo.clone(),
        directory: Arc::new(directory),
    };
    let state = ScheduleAppState { repo };

    let stats = Router::new()
        .route("/user/stats", get(handlers::user_stats::<R, D>))
        .with_state(stats_state);

    Router::new()
        .route(
            "/activities",
            get(handlers::list_activities::<R>).post(handlers::create_activity::<R>),
        )
        .route(
            "/activities/{id}",
            put(handlers::update_activity::<R>).delete(handlers::delete_activity::<R>),
        )
        .route("/activities/{id}/toggle", patch(handlers::toggle_activity::<R>))
        .route(
            "/weeks",
            get(handlers::list_weeks::<R>).post(handlers::create_week::<R>),
        )
        .route("/weeks/completed", get(handlers::list_completed_weeks::<R>))
        .route("/weeks/check-expired", get(handlers::check_expired_weeks::<R>))
        .route(
            "/weeks/{id}",
            put(handlers::update_week::<R>).delete(handlers::delete_week::<R>),
        )
        .route("/weeks/{id}/complete", patch(handlers::complete_week::<R>))
        .route(
            "/weeks/{id}/comments",
            get(handlers::list_day_comments::<R>).post(handlers::upsert_day_comment::<R>),
        )
        .route(
            "/weeks/{id}/comments/{dayOfWeek}",
            put(handlers::update_day_comment::<R>).delete(handlers::delete_day_comment::<R>),
        )
        .with_state(state)
        .merge(stats)
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer))
}
