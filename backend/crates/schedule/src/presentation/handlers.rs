//! HTTP Handlers
//!
//! Every handler runs behind the bearer middleware and acts for the `Caller`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use kernel::envelope::Envelope;
use kernel::extract::{Json as JsonBody, Path, Query};
use kernel::id::{ActivityId, WeekId};
use platform::bearer::Caller;
use std::sync::Arc;

use crate::application::{
    CheckExpiredWeeksUseCase, CompleteWeekUseCase, CreateActivityUseCase, CreateWeekUseCase,
    DeleteActivityUseCase, DeleteDayCommentUseCase, DeleteWeekUseCase, ListActivitiesUseCase,
    ListCompletedWeeksUseCase, ListDayCommentsUseCase, ListWeeksUseCase, ToggleActivityUseCase,
    UpdateActivityUseCase, UpdateDayCommentUseCase, UpdateWeekUseCase, UpsertDayCommentUseCase,
    UserStatsUseCase, parse_day,
};
use crate::domain::repository::{
    ActivityRepository, DayCommentRepository, UserDirectory, WeekRepository,
};
use crate::error::{ScheduleError, ScheduleResult};
use crate::presentation::dto::{
    ActivityListQuery, ActivityRequest, ActivityResponse, CheckExpiredResponse,
    CompletedWeeksQuery, CreateWeekRequest, DayCommentPath, DayCommentResponse,
    UpdateDayCommentRequest, UpdateWeekRequest, UpsertDayCommentRequest, UserStatsResponse,
    WeekResponse,
};

/// Everything the schedule handlers need from one repository value
pub trait ScheduleStore:
    ActivityRepository + WeekRepository + DayCommentRepository + Clone + Send + Sync + 'static
{
}

impl<T> ScheduleStore for T where
    T: ActivityRepository + WeekRepository + DayCommentRepository + Clone + Send + Sync + 'static
{
}

/// Shared state for schedule handlers
#[derive(Clone)]
pub struct ScheduleAppState<R>
where
    R: ScheduleStore,
{
    pub repo: Arc<R>,
}

/// State for the stats route, which also needs to know the account exists
#[derive(Clone)]
pub struct StatsAppState<R, D>
where
    R: ScheduleStore,
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub directory: Arc<D>,
}

/// Ids are opaque; a malformed one names nothing the caller owns
fn activity_id(raw: &str) -> ScheduleResult<ActivityId> {
    raw.parse().map_err(|_| ScheduleError::ActivityNotFound)
}

fn week_id(raw: &str) -> ScheduleResult<WeekId> {
    raw.parse().map_err(|_| ScheduleError::WeekNotFound)
}

// ============================================================================
// Stats
// ============================================================================

/// GET /user/stats
pub async fn user_stats<R, D>(
    State(state): State<StatsAppState<R, D>>,
    caller: Caller,
) -> ScheduleResult<Json<Envelope<UserStatsResponse>>>
where
    R: ScheduleStore,
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    let stats = UserStatsUseCase::new(state.repo.clone(), state.directory.clone())
        .execute(&caller.user_id, Utc::now())
        .await?;

    Ok(Json(Envelope::new(stats.into())))
}

// ============================================================================
// Activities
// ============================================================================

/// GET /activities
pub async fn list_activities<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Query(query): Query<ActivityListQuery>,
) -> ScheduleResult<Json<Envelope<Vec<ActivityResponse>>>>
where
    R: ScheduleStore,
{
    let activities = ListActivitiesUseCase::new(state.repo.clone())
        .execute(&caller.user_id, query.into())
        .await?;

    Ok(Json(Envelope::new(
        activities.into_iter().map(Into::into).collect(),
    )))
}

/// POST /activities
pub async fn create_activity<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    JsonBody(req): JsonBody<ActivityRequest>,
) -> ScheduleResult<impl IntoResponse>
where
    R: ScheduleStore,
{
    let activity = CreateActivityUseCase::new(state.repo.clone())
        .execute(&caller.user_id, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(ActivityResponse::from(activity))),
    ))
}

/// PUT /activities/{id}
pub async fn update_activity<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ActivityRequest>,
) -> ScheduleResult<Json<Envelope<ActivityResponse>>>
where
    R: ScheduleStore,
{
    let activity = UpdateActivityUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &activity_id(&id)?, req.into())
        .await?;

    Ok(Json(Envelope::new(activity.into())))
}

/// DELETE /activities/{id}
pub async fn delete_activity<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> ScheduleResult<impl IntoResponse>
where
    R: ScheduleStore,
{
    DeleteActivityUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &activity_id(&id)?)
        .await?;

    Ok(Json(Envelope::message("Activity deleted")))
}

/// PATCH /activities/{id}/toggle
pub async fn toggle_activity<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> ScheduleResult<Json<Envelope<ActivityResponse>>>
where
    R: ScheduleStore,
{
    let activity = ToggleActivityUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &activity_id(&id)?)
        .await?;

    Ok(Json(Envelope::new(activity.into())))
}

// ============================================================================
// Weeks
// ============================================================================

/// GET /weeks
pub async fn list_weeks<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
) -> ScheduleResult<Json<Envelope<Vec<WeekResponse>>>>
where
    R: ScheduleStore,
{
    let weeks = ListWeeksUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(Envelope::new(weeks.into_iter().map(Into::into).collect())))
}

/// POST /weeks
pub async fn create_week<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    JsonBody(req): JsonBody<CreateWeekRequest>,
) -> ScheduleResult<impl IntoResponse>
where
    R: ScheduleStore,
{
    let week = CreateWeekUseCase::new(state.repo.clone())
        .execute(&caller.user_id, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(WeekResponse::from(week))),
    ))
}

/// GET /weeks/completed
pub async fn list_completed_weeks<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Query(query): Query<CompletedWeeksQuery>,
) -> ScheduleResult<Json<Envelope<Vec<WeekResponse>>>>
where
    R: ScheduleStore,
{
    let weeks = ListCompletedWeeksUseCase::new(state.repo.clone())
        .execute(&caller.user_id, query.limit())
        .await?;

    Ok(Json(Envelope::new(weeks.into_iter().map(Into::into).collect())))
}

/// GET /weeks/check-expired
pub async fn check_expired_weeks<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
) -> ScheduleResult<Json<Envelope<CheckExpiredResponse>>>
where
    R: ScheduleStore,
{
    let output = CheckExpiredWeeksUseCase::new(state.repo.clone())
        .execute(&caller.user_id, Utc::now())
        .await?;

    Ok(Json(Envelope::new(output.into())))
}

/// PUT /weeks/{id}
pub async fn update_week<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateWeekRequest>,
) -> ScheduleResult<Json<Envelope<WeekResponse>>>
where
    R: ScheduleStore,
{
    let week = UpdateWeekUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &week_id(&id)?, req.into())
        .await?;

    Ok(Json(Envelope::new(week.into())))
}

/// DELETE /weeks/{id}
pub async fn delete_week<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> ScheduleResult<impl IntoResponse>
where
    R: ScheduleStore,
{
    DeleteWeekUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &week_id(&id)?)
        .await?;

    Ok(Json(Envelope::message("Week deleted")))
}

/// PATCH /weeks/{id}/complete
pub async fn complete_week<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> ScheduleResult<Json<Envelope<WeekResponse>>>
where
    R: ScheduleStore,
{
    let week = CompleteWeekUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &week_id(&id)?, Utc::now())
        .await?;

    Ok(Json(Envelope::new(week.into())))
}

// ============================================================================
// Day comments
// ============================================================================

/// GET /weeks/{id}/comments
pub async fn list_day_comments<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> ScheduleResult<Json<Envelope<Vec<DayCommentResponse>>>>
where
    R: ScheduleStore,
{
    let comments = ListDayCommentsUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&caller.user_id, &week_id(&id)?)
        .await?;

    Ok(Json(Envelope::new(
        comments.into_iter().map(Into::into).collect(),
    )))
}

/// POST /weeks/{id}/comments
pub async fn upsert_day_comment<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpsertDayCommentRequest>,
) -> ScheduleResult<Json<Envelope<DayCommentResponse>>>
where
    R: ScheduleStore,
{
    let comment = UpsertDayCommentUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&caller.user_id, &week_id(&id)?, req.into())
        .await?;

    Ok(Json(Envelope::new(comment.into())))
}

/// PUT /weeks/{id}/comments/{dayOfWeek}
pub async fn update_day_comment<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(path): Path<DayCommentPath>,
    JsonBody(req): JsonBody<UpdateDayCommentRequest>,
) -> ScheduleResult<Json<Envelope<DayCommentResponse>>>
where
    R: ScheduleStore,
{
    let comment = UpdateDayCommentUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(
            &caller.user_id,
            &week_id(&path.week_id)?,
            parse_day(path.day_of_week)?,
            req.into(),
        )
        .await?;

    Ok(Json(Envelope::new(comment.into())))
}

/// DELETE /weeks/{id}/comments/{dayOfWeek}
pub async fn delete_day_comment<R>(
    State(state): State<ScheduleAppState<R>>,
    caller: Caller,
    Path(path): Path<DayCommentPath>,
) -> ScheduleResult<impl IntoResponse>
where
    R: ScheduleStore,
{
    DeleteDayCommentUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(
            &caller.user_id,
            &week_id(&path.week_id)?,
            parse_day(path.day_of_week)?,
        )
        .await?;

    Ok(Json(Envelope::message("Comment deleted")))
}
