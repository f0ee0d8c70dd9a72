//! PostgreSQL Repository Implementations
//!
//! Writes to owned rows carry both the id and the owner in their `WHERE`
//! clause.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ActivityId, UserId, WeekId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Activity, DayComment, Week};
use crate::domain::repository::{
    ActivityRepository, DayCommentRepository, UserDirectory, WeekRepository,
};
use crate::domain::value_objects::{ActivityDetails, ActivityFilter, DayOfWeek};
use crate::error::{ScheduleError, ScheduleResult};

/// PostgreSQL-backed schedule repository
#[derive(Clone)]
pub struct PgScheduleRepository {
    pool: PgPool,
}

impl PgScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ACTIVITY_COLUMNS: &str = r#"
    id,
    user_id,
    title,
    description,
    activity_type,
    start_time,
    end_time,
    date,
    completed,
    created_at,
    updated_at
"#;

const WEEK_COLUMNS: &str = r#"
    id,
    user_id,
    start_date,
    end_date,
    week_number,
    is_active,
    is_completed,
    completed_at,
    created_at,
    updated_at
"#;

const COMMENT_COLUMNS: &str = "week_id, day_of_week, comment, created_at, updated_at";

/// Foreign key violation on `user_id`: the token outlived its account
fn map_missing_owner(err: sqlx::Error) -> ScheduleError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            ScheduleError::UserNotFound
        }
        _ => ScheduleError::Database(err),
    }
}

// ============================================================================
// Activity Repository Implementation
// ============================================================================

impl ActivityRepository for PgScheduleRepository {
    async fn list(&self, user_id: &UserId, filter: &ActivityFilter) -> ScheduleResult<Vec<Activity>> {
        let (on, from, to): (Option<NaiveDate>, Option<NaiveDate>, Option<NaiveDate>) = match *filter {
            ActivityFilter::All => (None, None, None),
            ActivityFilter::On(date) => (Some(date), None, None),
            ActivityFilter::Between { from, to } => (None, from, to),
        };

        let rows = sqlx::query_as::<_, ActivityRow>(&format!(
            r#"
            SELECT {ACTIVITY_COLUMNS} FROM activities
            WHERE user_id = $1
              AND ($2::date IS NULL OR date = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY start_time ASC
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(on)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ActivityRow::into_activity).collect()
    }

    async fn find(&self, activity_id: &ActivityId, user_id: &UserId) -> ScheduleResult<Option<Activity>> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1 AND user_id = $2"
        ))
        .bind(activity_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ActivityRow::into_activity).transpose()
    }

    async fn create(&self, activity: &Activity) -> ScheduleResult<()> {
        let details = &activity.details;

        sqlx::query(
            r#"
            INSERT INTO activities (
                id,
                user_id,
                title,
                description,
                activity_type,
                start_time,
                end_time,
                date,
                completed,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(activity.activity_id.as_uuid())
        .bind(activity.user_id.as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(details.activity_type.as_str())
        .bind(&details.start_time)
        .bind(&details.end_time)
        .bind(details.date)
        .bind(activity.completed)
        .bind(activity.created_at)
        .bind(activity.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_missing_owner)?;

        Ok(())
    }

    async fn update(&self, activity: &Activity) -> ScheduleResult<bool> {
        let details = &activity.details;

        let updated = sqlx::query(
            r#"
            UPDATE activities SET
                title = $3,
                description = $4,
                activity_type = $5,
                start_time = $6,
                end_time = $7,
                date = $8,
                updated_at = $9
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(activity.activity_id.as_uuid())
        .bind(activity.user_id.as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(details.activity_type.as_str())
        .bind(&details.start_time)
        .bind(&details.end_time)
        .bind(details.date)
        .bind(activity.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, activity_id: &ActivityId, user_id: &UserId) -> ScheduleResult<bool> {
        let deleted = sqlx::query("DELETE FROM activities WHERE id = $1 AND user_id = $2")
            .bind(activity_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn toggle(
        &self,
        activity_id: &ActivityId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Option<Activity>> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            r#"
            UPDATE activities SET completed = NOT completed, updated_at = $3
            WHERE id = $1 AND user_id = $2
            RETURNING {ACTIVITY_COLUMNS}
            "#
        ))
        .bind(activity_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ActivityRow::into_activity).transpose()
    }
}

// ============================================================================
// Week Repository Implementation
// ============================================================================

impl WeekRepository for PgScheduleRepository {
    async fn list(&self, user_id: &UserId) -> ScheduleResult<Vec<Week>> {
        let rows = sqlx::query_as::<_, WeekRow>(&format!(
            "SELECT {WEEK_COLUMNS} FROM weeks WHERE user_id = $1 ORDER BY start_date DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WeekRow::into_week).collect())
    }

    async fn list_completed(&self, user_id: &UserId, limit: i64) -> ScheduleResult<Vec<Week>> {
        let rows = sqlx::query_as::<_, WeekRow>(&format!(
            r#"
            SELECT {WEEK_COLUMNS} FROM weeks
            WHERE user_id = $1 AND is_completed
            ORDER BY completed_at DESC NULLS LAST
            LIMIT $2
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WeekRow::into_week).collect())
    }

    async fn find(&self, week_id: &WeekId, user_id: &UserId) -> ScheduleResult<Option<Week>> {
        let row = sqlx::query_as::<_, WeekRow>(&format!(
            "SELECT {WEEK_COLUMNS} FROM weeks WHERE id = $1 AND user_id = $2"
        ))
        .bind(week_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WeekRow::into_week))
    }

    async fn create(&self, week: &Week) -> ScheduleResult<()> {
        sqlx::query(
            r#"
            INSERT INTO weeks (
                id,
                user_id,
                start_date,
                end_date,
                week_number,
                is_active,
                is_completed,
                completed_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(week.week_id.as_uuid())
        .bind(week.user_id.as_uuid())
        .bind(week.start_date)
        .bind(week.end_date)
        .bind(week.week_number)
        .bind(week.is_active)
        .bind(week.is_completed)
        .bind(week.completed_at)
        .bind(week.created_at)
        .bind(week.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_missing_owner)?;

        Ok(())
    }

    async fn update(&self, week: &Week) -> ScheduleResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE weeks SET
                start_date = $3,
                end_date = $4,
                week_number = $5,
                is_active = $6,
                is_completed = $7,
                completed_at = $8,
                updated_at = $9
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(week.week_id.as_uuid())
        .bind(week.user_id.as_uuid())
        .bind(week.start_date)
        .bind(week.end_date)
        .bind(week.week_number)
        .bind(week.is_active)
        .bind(week.is_completed)
        .bind(week.completed_at)
        .bind(week.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, week_id: &WeekId, user_id: &UserId) -> ScheduleResult<bool> {
        let deleted = sqlx::query("DELETE FROM weeks WHERE id = $1 AND user_id = $2")
            .bind(week_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn complete_expired(&self, user_id: &UserId, now: DateTime<Utc>) -> ScheduleResult<Vec<Week>> {
        let rows = sqlx::query_as::<_, WeekRow>(&format!(
            r#"
            UPDATE weeks SET
                is_active = FALSE,
                is_completed = TRUE,
                completed_at = $2,
                updated_at = $2
            WHERE user_id = $1 AND is_active AND end_date < $2
            RETURNING {WEEK_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WeekRow::into_week).collect())
    }
}

// ============================================================================
// Day Comment Repository Implementation
// ============================================================================

impl DayCommentRepository for PgScheduleRepository {
    async fn upsert(&self, comment: &DayComment) -> ScheduleResult<DayComment> {
        let row = sqlx::query_as::<_, DayCommentRow>(&format!(
            r#"
            INSERT INTO day_comments (week_id, day_of_week, comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (week_id, day_of_week) DO UPDATE SET
                comment = EXCLUDED.comment,
                updated_at = EXCLUDED.updated_at
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment.week_id.as_uuid())
        .bind(i16::from(comment.day_of_week.value()))
        .bind(&comment.comment)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_comment()
    }

    async fn list(&self, week_id: &WeekId) -> ScheduleResult<Vec<DayComment>> {
        let rows = sqlx::query_as::<_, DayCommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM day_comments WHERE week_id = $1 ORDER BY day_of_week"
        ))
        .bind(week_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DayCommentRow::into_comment).collect()
    }

    async fn update(
        &self,
        week_id: &WeekId,
        day_of_week: DayOfWeek,
        comment: &str,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Option<DayComment>> {
        let row = sqlx::query_as::<_, DayCommentRow>(&format!(
            r#"
            UPDATE day_comments SET comment = $3, updated_at = $4
            WHERE week_id = $1 AND day_of_week = $2
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(week_id.as_uuid())
        .bind(i16::from(day_of_week.value()))
        .bind(comment)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DayCommentRow::into_comment).transpose()
    }

    async fn delete(&self, week_id: &WeekId, day_of_week: DayOfWeek) -> ScheduleResult<bool> {
        let deleted = sqlx::query("DELETE FROM day_comments WHERE week_id = $1 AND day_of_week = $2")
            .bind(week_id.as_uuid())
            .bind(i16::from(day_of_week.value()))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Accounts
// ============================================================================

impl UserDirectory for PgScheduleRepository {
    async fn user_exists(&self, user_id: &UserId) -> ScheduleResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    activity_type: String,
    start_time: String,
    end_time: String,
    date: NaiveDate,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ActivityRow {
    fn into_activity(self) -> ScheduleResult<Activity> {
        let activity_type = self.activity_type.parse().map_err(|_| {
            ScheduleError::Internal(format!("unknown activity type {:?}", self.activity_type))
        })?;

        Ok(Activity {
            activity_id: ActivityId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            details: ActivityDetails {
                title: self.title,
                description: self.description,
                activity_type,
                start_time: self.start_time,
                end_time: self.end_time,
                date: self.date,
            },
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WeekRow {
    id: Uuid,
    user_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    week_number: i32,
    is_active: bool,
    is_completed: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WeekRow {
    fn into_week(self) -> Week {
        Week {
            week_id: WeekId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            start_date: self.start_date,
            end_date: self.end_date,
            week_number: self.week_number,
            is_active: self.is_active,
            is_completed: self.is_completed,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DayCommentRow {
    week_id: Uuid,
    day_of_week: i16,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DayCommentRow {
    fn into_comment(self) -> ScheduleResult<DayComment> {
        let day_of_week = DayOfWeek::new(i64::from(self.day_of_week)).ok_or_else(|| {
            ScheduleError::Internal(format!("stored day_of_week {} out of range", self.day_of_week))
        })?;

        Ok(DayComment {
            week_id: WeekId::from_uuid(self.week_id),
            day_of_week,
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
