//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every lookup and mutation of an owned resource is scoped by the owner, so a
//! foreign id behaves exactly like a missing one.

use chrono::{DateTime, Utc};
use kernel::id::{ActivityId, UserId, WeekId};

use crate::domain::entities::{Activity, DayComment, Week};
use crate::domain::value_objects::{ActivityFilter, DayOfWeek};
use crate::error::ScheduleResult;

/// Activity repository trait
#[trait_variant::make(ActivityRepository: Send)]
pub trait LocalActivityRepository {
    /// Caller's activities matching `filter`, ordered by start time
    async fn list(&self, user_id: &UserId, filter: &ActivityFilter) -> ScheduleResult<Vec<Activity>>;

    async fn find(&self, activity_id: &ActivityId, user_id: &UserId) -> ScheduleResult<Option<Activity>>;

    async fn create(&self, activity: &Activity) -> ScheduleResult<()>;

    /// Write back editable fields; `false` when no row matched id and owner
    async fn update(&self, activity: &Activity) -> ScheduleResult<bool>;

    async fn delete(&self, activity_id: &ActivityId, user_id: &UserId) -> ScheduleResult<bool>;

    /// Flip `completed` in a single step and return the new state
    async fn toggle(
        &self,
        activity_id: &ActivityId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Option<Activity>>;
}

/// Week repository trait
#[trait_variant::make(WeekRepository: Send)]
pub trait LocalWeekRepository {
    /// Caller's weeks, newest `start_date` first
    async fn list(&self, user_id: &UserId) -> ScheduleResult<Vec<Week>>;

    /// Caller's completed weeks, newest `completed_at` first
    async fn list_completed(&self, user_id: &UserId, limit: i64) -> ScheduleResult<Vec<Week>>;

    async fn find(&self, week_id: &WeekId, user_id: &UserId) -> ScheduleResult<Option<Week>>;

    async fn create(&self, week: &Week) -> ScheduleResult<()>;

    /// `false` when no row matched id and owner
    async fn update(&self, week: &Week) -> ScheduleResult<bool>;

    async fn delete(&self, week_id: &WeekId, user_id: &UserId) -> ScheduleResult<bool>;

    /// Complete every active week of the caller that ended before `now`,
    /// stamping each with `now`, and return the completed weeks
    async fn complete_expired(&self, user_id: &UserId, now: DateTime<Utc>) -> ScheduleResult<Vec<Week>>;
}

/// Day comment repository trait
///
/// Callers resolve the owning week first; these methods trust `week_id`.
#[trait_variant::make(DayCommentRepository: Send)]
pub trait LocalDayCommentRepository {
    /// Insert, or overwrite the text of the existing `(week_id, day_of_week)` row
    async fn upsert(&self, comment: &DayComment) -> ScheduleResult<DayComment>;

    /// Ordered by day
    async fn list(&self, week_id: &WeekId) -> ScheduleResult<Vec<DayComment>>;

    /// Only updates an existing row
    async fn update(
        &self,
        week_id: &WeekId,
        day_of_week: DayOfWeek,
        comment: &str,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Option<DayComment>>;

    async fn delete(&self, week_id: &WeekId, day_of_week: DayOfWeek) -> ScheduleResult<bool>;
}

/// Account lookup
///
/// Accounts belong to another crate; schedule only asks whether one is still
/// there.
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    async fn user_exists(&self, user_id: &UserId) -> ScheduleResult<bool>;
}
