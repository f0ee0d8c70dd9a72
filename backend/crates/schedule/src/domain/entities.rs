//! Domain Entities
//!
//! Core business objects with identity.

use chrono::{DateTime, Utc};
use kernel::id::{ActivityId, UserId, WeekId};

use crate::domain::value_objects::{ActivityDetails, ActivityType, DayOfWeek, WeekPatch};
use crate::error::{ScheduleError, ScheduleResult};

// ============================================================================
// Activity
// ============================================================================

/// A timed entry on one calendar date, owned by one user
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub activity_id: ActivityId,
    pub user_id: UserId,
    pub details: ActivityDetails,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    /// New activities start not completed
    pub fn new(user_id: UserId, details: ActivityDetails, now: DateTime<Utc>) -> Self {
        Self {
            activity_id: ActivityId::new(),
            user_id,
            details,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn activity_type(&self) -> ActivityType {
        self.details.activity_type
    }

    /// Replace the editable fields, keeping id, owner and completion
    pub fn apply(&mut self, details: ActivityDetails, now: DateTime<Utc>) {
        self.details = details;
        self.updated_at = now;
    }

    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.updated_at = now;
    }
}

// ============================================================================
// Week
// ============================================================================

/// A dated span grouping a user's activities
///
/// Lifecycle: created active, then completed (explicitly or on expiry). A
/// completed week never becomes active again.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub week_id: WeekId,
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub week_number: i32,
    pub is_active: bool,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Week {
    pub fn new(
        user_id: UserId,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        week_number: i32,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Self> {
        if start_date >= end_date {
            return Err(ScheduleError::InvalidRange);
        }

        Ok(Self {
            week_id: WeekId::new(),
            user_id,
            start_date,
            end_date,
            week_number,
            is_active: true,
            is_completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Active and already past its end
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.end_date < now
    }

    /// Stamps `completed_at = now`, also when the week was already completed
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.is_completed = true;
        self.completed_at = Some(now);
        self.updated_at = now;
    }

    /// Merge a partial update
    ///
    /// The merged range must stay ordered. `isCompleted: true` or
    /// `isActive: false` completes the week.
    pub fn apply(&mut self, patch: WeekPatch, now: DateTime<Utc>) -> ScheduleResult<()> {
        let start_date = patch.start_date.unwrap_or(self.start_date);
        let end_date = patch.end_date.unwrap_or(self.end_date);
        if start_date >= end_date {
            return Err(ScheduleError::InvalidRange);
        }

        let reactivate = patch.is_active == Some(true) || patch.is_completed == Some(false);
        if self.is_completed && reactivate {
            return Err(ScheduleError::WeekAlreadyCompleted);
        }

        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(week_number) = patch.week_number {
            self.week_number = week_number;
        }
        self.updated_at = now;

        if patch.is_completed == Some(true) || patch.is_active == Some(false) {
            self.complete(now);
        }

        Ok(())
    }
}

// ============================================================================
// DayComment
// ============================================================================

/// Free-text note for one day of a week, keyed by `(week_id, day_of_week)`
#[derive(Debug, Clone, PartialEq)]
pub struct DayComment {
    pub week_id: WeekId,
    pub day_of_week: DayOfWeek,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DayComment {
    pub fn new(week_id: WeekId, day_of_week: DayOfWeek, comment: String, now: DateTime<Utc>) -> Self {
        Self {
            week_id,
            day_of_week,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}
