//! Day Comment Use Cases
//!
//! Each operation resolves the week through `(week_id, caller)` before it
//! touches a comment, so comments of foreign weeks answer `WeekNotFound`.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{UserId, WeekId};
use validator::Validate;

use crate::domain::entities::{DayComment, Week};
use crate::domain::repository::{DayCommentRepository, WeekRepository};
use crate::domain::value_objects::DayOfWeek;
use crate::error::{ScheduleError, ScheduleResult};

#[derive(Debug, Default, Validate)]
pub struct UpsertDayCommentInput {
    #[validate(
        required(message = "Day of week is required"),
        range(min = 0, max = 6, message = "Day of week must be between 0 and 6")
    )]
    pub day_of_week: Option<i64>,
    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
}

#[derive(Debug, Default, Validate)]
pub struct UpdateDayCommentInput {
    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
}

async fn owned_week<W>(week_repo: &W, week_id: &WeekId, user_id: &UserId) -> ScheduleResult<Week>
where
    W: WeekRepository,
{
    week_repo
        .find(week_id, user_id)
        .await?
        .ok_or(ScheduleError::WeekNotFound)
}

/// Path segment to day index
pub fn parse_day(day_of_week: i64) -> ScheduleResult<DayOfWeek> {
    DayOfWeek::new(day_of_week).ok_or(ScheduleError::InvalidDayOfWeek)
}

// ============================================================================
// Upsert
// ============================================================================

pub struct UpsertDayCommentUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    week_repo: Arc<W>,
    comment_repo: Arc<C>,
}

impl<W, C> UpsertDayCommentUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    pub fn new(week_repo: Arc<W>, comment_repo: Arc<C>) -> Self {
        Self {
            week_repo,
            comment_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        week_id: &WeekId,
        input: UpsertDayCommentInput,
    ) -> ScheduleResult<DayComment> {
        input.validate()?;
        let day = input
            .day_of_week
            .and_then(DayOfWeek::new)
            .ok_or(ScheduleError::InvalidDayOfWeek)?;

        let week = owned_week(self.week_repo.as_ref(), week_id, user_id).await?;

        let comment = DayComment::new(week.week_id, day, input.comment, Utc::now());
        let stored = self.comment_repo.upsert(&comment).await?;

        tracing::info!(
            user_id = %user_id,
            week_id = %week_id,
            day_of_week = day.value(),
            "Day comment saved"
        );

        Ok(stored)
    }
}

// ============================================================================
// List
// ============================================================================

pub struct ListDayCommentsUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    week_repo: Arc<W>,
    comment_repo: Arc<C>,
}

impl<W, C> ListDayCommentsUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    pub fn new(week_repo: Arc<W>, comment_repo: Arc<C>) -> Self {
        Self {
            week_repo,
            comment_repo,
        }
    }

    pub async fn execute(&self, user_id: &UserId, week_id: &WeekId) -> ScheduleResult<Vec<DayComment>> {
        owned_week(self.week_repo.as_ref(), week_id, user_id).await?;
        self.comment_repo.list(week_id).await
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateDayCommentUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    week_repo: Arc<W>,
    comment_repo: Arc<C>,
}

impl<W, C> UpdateDayCommentUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    pub fn new(week_repo: Arc<W>, comment_repo: Arc<C>) -> Self {
        Self {
            week_repo,
            comment_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        week_id: &WeekId,
        day_of_week: DayOfWeek,
        input: UpdateDayCommentInput,
    ) -> ScheduleResult<DayComment> {
        input.validate()?;
        owned_week(self.week_repo.as_ref(), week_id, user_id).await?;

        self.comment_repo
            .update(week_id, day_of_week, &input.comment, Utc::now())
            .await?
            .ok_or(ScheduleError::CommentNotFound)
    }
}

// ============================================================================
// Delete
// ============================================================================

pub struct DeleteDayCommentUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    week_repo: Arc<W>,
    comment_repo: Arc<C>,
}

impl<W, C> DeleteDayCommentUseCase<W, C>
where
    W: WeekRepository,
    C: DayCommentRepository,
{
    pub fn new(week_repo: Arc<W>, comment_repo: Arc<C>) -> Self {
        Self {
            week_repo,
            comment_repo,
        }
    }

    pub async fn execute(&self, user_id: &UserId, week_id: &WeekId, day_of_week: DayOfWeek) -> ScheduleResult<()> {
        owned_week(self.week_repo.as_ref(), week_id, user_id).await?;

        if !self.comment_repo.delete(week_id, day_of_week).await? {
            return Err(ScheduleError::CommentNotFound);
        }

        tracing::info!(
            user_id = %user_id,
            week_id = %week_id,
            day_of_week = day_of_week.value(),
            "Day comment deleted"
        );
        Ok(())
    }
}
