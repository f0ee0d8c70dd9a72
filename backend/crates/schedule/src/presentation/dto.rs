//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{
    ActivityInput, CheckExpiredOutput, CreateWeekInput, ListActivitiesInput,
    UpdateDayCommentInput, UpdateWeekInput, UpsertDayCommentInput,
};
use crate::domain::entities::{Activity, DayComment, Week};
use crate::domain::services::UserStats;
use crate::domain::value_objects::ActivityType;

// ============================================================================
// Activities
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub start_time: String,
    pub end_time: String,
    pub date: String,
}

impl From<ActivityRequest> for ActivityInput {
    fn from(req: ActivityRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            activity_type: req.activity_type,
            start_time: req.start_time,
            end_time: req.end_time,
            date: req.date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityListQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<ActivityListQuery> for ListActivitiesInput {
    fn from(query: ActivityListQuery) -> Self {
        Self {
            date: query.date,
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub start_time: String,
    pub end_time: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        let details = activity.details;
        Self {
            id: activity.activity_id.to_string(),
            user_id: activity.user_id.to_string(),
            title: details.title,
            description: details.description,
            activity_type: details.activity_type,
            start_time: details.start_time,
            end_time: details.end_time,
            date: details.date,
            completed: activity.completed,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

// ============================================================================
// Weeks
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateWeekRequest {
    pub start_date: String,
    pub end_date: String,
    pub week_number: Option<i64>,
}

impl From<CreateWeekRequest> for CreateWeekInput {
    fn from(req: CreateWeekRequest) -> Self {
        Self {
            start_date: req.start_date,
            end_date: req.end_date,
            week_number: req.week_number,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateWeekRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub week_number: Option<i64>,
    pub is_active: Option<bool>,
    pub is_completed: Option<bool>,
}

impl From<UpdateWeekRequest> for UpdateWeekInput {
    fn from(req: UpdateWeekRequest) -> Self {
        Self {
            start_date: req.start_date,
            end_date: req.end_date,
            week_number: req.week_number,
            is_active: req.is_active,
            is_completed: req.is_completed,
        }
    }
}

/// `limit` is read leniently: anything that is not a positive integer
/// falls back to the default page size
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletedWeeksQuery {
    pub limit: Option<String>,
}

impl CompletedWeeksQuery {
    pub fn limit(&self) -> Option<i64> {
        self.limit.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekResponse {
    pub id: String,
    pub user_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub week_number: i32,
    pub is_active: bool,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Week> for WeekResponse {
    fn from(week: Week) -> Self {
        Self {
            id: week.week_id.to_string(),
            user_id: week.user_id.to_string(),
            start_date: week.start_date,
            end_date: week.end_date,
            week_number: week.week_number,
            is_active: week.is_active,
            is_completed: week.is_completed,
            completed_at: week.completed_at,
            created_at: week.created_at,
            updated_at: week.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckExpiredResponse {
    pub finalized: usize,
    pub weeks: Vec<WeekResponse>,
}

impl From<CheckExpiredOutput> for CheckExpiredResponse {
    fn from(output: CheckExpiredOutput) -> Self {
        Self {
            finalized: output.finalized,
            weeks: output.weeks.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Day comments
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpsertDayCommentRequest {
    pub day_of_week: Option<i64>,
    pub comment: String,
}

impl From<UpsertDayCommentRequest> for UpsertDayCommentInput {
    fn from(req: UpsertDayCommentRequest) -> Self {
        Self {
            day_of_week: req.day_of_week,
            comment: req.comment,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateDayCommentRequest {
    pub comment: String,
}

impl From<UpdateDayCommentRequest> for UpdateDayCommentInput {
    fn from(req: UpdateDayCommentRequest) -> Self {
        Self {
            comment: req.comment,
        }
    }
}

/// Path of `/weeks/{id}/comments/{dayOfWeek}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCommentPath {
    #[serde(rename = "id")]
    pub week_id: String,
    pub day_of_week: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCommentResponse {
    pub week_id: String,
    pub day_of_week: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DayComment> for DayCommentResponse {
    fn from(comment: DayComment) -> Self {
        Self {
            week_id: comment.week_id.to_string(),
            day_of_week: comment.day_of_week.value(),
            comment: comment.comment,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    pub total_activities: usize,
    pub completed_activities: usize,
    pub pending_activities: usize,
    pub streak_days: usize,
    pub total_hours: i64,
    pub favorite_activity_type: String,
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            total_activities: stats.total_activities,
            completed_activities: stats.completed_activities,
            pending_activities: stats.pending_activities,
            streak_days: stats.streak_days,
            total_hours: stats.total_hours,
            favorite_activity_type: stats.favorite_activity_type,
        }
    }
}
