//! In-memory repository
//!
//! Backs use-case tests and local runs without a database. Mirrors the
//! Postgres implementation's ordering, owner scoping and the cascades from
//! users and weeks. Every user counts as existing until [`remove_user`] is
//! called for it.
//!
//! [`remove_user`]: InMemoryScheduleRepository::remove_user

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{ActivityId, UserId, WeekId};
use tokio::sync::RwLock;

use crate::domain::entities::{Activity, DayComment, Week};
use crate::domain::repository::{
    ActivityRepository, DayCommentRepository, UserDirectory, WeekRepository,
};
use crate::domain::value_objects::{ActivityFilter, DayOfWeek};
use crate::error::ScheduleResult;

#[derive(Clone, Default)]
pub struct InMemoryScheduleRepository {
    activities: Arc<RwLock<HashMap<ActivityId, Activity>>>,
    weeks: Arc<RwLock<HashMap<WeekId, Week>>>,
    comments: Arc<RwLock<HashMap<(WeekId, DayOfWeek), DayComment>>>,
    removed_users: Arc<RwLock<HashSet<UserId>>>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn comment_count(&self) -> usize {
        self.comments.read().await.len()
    }

    /// Forget a user and everything they own
    pub async fn remove_user(&self, user_id: &UserId) {
        self.removed_users.write().await.insert(*user_id);
        self.activities.write().await.retain(|_, a| a.user_id != *user_id);

        let mut weeks = self.weeks.write().await;
        let owned: HashSet<WeekId> = weeks
            .values()
            .filter(|w| w.user_id == *user_id)
            .map(|w| w.week_id)
            .collect();
        weeks.retain(|id, _| !owned.contains(id));
        self.comments
            .write()
            .await
            .retain(|(week_id, _), _| !owned.contains(week_id));
    }
}

impl UserDirectory for InMemoryScheduleRepository {
    async fn user_exists(&self, user_id: &UserId) -> ScheduleResult<bool> {
        Ok(!self.removed_users.read().await.contains(user_id))
    }
}

// ============================================================================
// Activities
// ============================================================================

impl ActivityRepository for InMemoryScheduleRepository {
    async fn list(&self, user_id: &UserId, filter: &ActivityFilter) -> ScheduleResult<Vec<Activity>> {
        let mut activities: Vec<Activity> = self
            .activities
            .read()
            .await
            .values()
            .filter(|a| a.user_id == *user_id && filter.matches(a.details.date))
            .cloned()
            .collect();
        activities.sort_by(|a, b| a.details.start_time.cmp(&b.details.start_time));
        Ok(activities)
    }

    async fn find(&self, activity_id: &ActivityId, user_id: &UserId) -> ScheduleResult<Option<Activity>> {
        Ok(self
            .activities
            .read()
            .await
            .get(activity_id)
            .filter(|a| a.user_id == *user_id)
            .cloned())
    }

    async fn create(&self, activity: &Activity) -> ScheduleResult<()> {
        self.activities
            .write()
            .await
            .insert(activity.activity_id, activity.clone());
        Ok(())
    }

    async fn update(&self, activity: &Activity) -> ScheduleResult<bool> {
        let mut activities = self.activities.write().await;
        match activities.get_mut(&activity.activity_id) {
            Some(stored) if stored.user_id == activity.user_id => {
                stored.details = activity.details.clone();
                stored.updated_at = activity.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, activity_id: &ActivityId, user_id: &UserId) -> ScheduleResult<bool> {
        let mut activities = self.activities.write().await;
        if activities.get(activity_id).is_some_and(|a| a.user_id == *user_id) {
            activities.remove(activity_id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn toggle(
        &self,
        activity_id: &ActivityId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Option<Activity>> {
        let mut activities = self.activities.write().await;
        Ok(activities
            .get_mut(activity_id)
            .filter(|a| a.user_id == *user_id)
            .map(|a| {
                a.toggle(now);
                a.clone()
            }))
    }
}

// ============================================================================
// Weeks
// ============================================================================

impl WeekRepository for InMemoryScheduleRepository {
    async fn list(&self, user_id: &UserId) -> ScheduleResult<Vec<Week>> {
        let mut weeks: Vec<Week> = self
            .weeks
            .read()
            .await
            .values()
            .filter(|w| w.user_id == *user_id)
            .cloned()
            .collect();
        weeks.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(weeks)
    }

    async fn list_completed(&self, user_id: &UserId, limit: i64) -> ScheduleResult<Vec<Week>> {
        let mut weeks: Vec<Week> = self
            .weeks
            .read()
            .await
            .values()
            .filter(|w| w.user_id == *user_id && w.is_completed)
            .cloned()
            .collect();
        weeks.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        weeks.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(weeks)
    }

    async fn find(&self, week_id: &WeekId, user_id: &UserId) -> ScheduleResult<Option<Week>> {
        Ok(self
            .weeks
            .read()
            .await
            .get(week_id)
            .filter(|w| w.user_id == *user_id)
            .cloned())
    }

    async fn create(&self, week: &Week) -> ScheduleResult<()> {
        self.weeks.write().await.insert(week.week_id, week.clone());
        Ok(())
    }

    async fn update(&self, week: &Week) -> ScheduleResult<bool> {
        let mut weeks = self.weeks.write().await;
        match weeks.get_mut(&week.week_id) {
            Some(stored) if stored.user_id == week.user_id => {
                *stored = week.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, week_id: &WeekId, user_id: &UserId) -> ScheduleResult<bool> {
        let mut weeks = self.weeks.write().await;
        if !weeks.get(week_id).is_some_and(|w| w.user_id == *user_id) {
            return Ok(false);
        }
        weeks.remove(week_id);
        self.comments
            .write()
            .await
            .retain(|(comment_week, _), _| comment_week != week_id);
        Ok(true)
    }

    async fn complete_expired(&self, user_id: &UserId, now: DateTime<Utc>) -> ScheduleResult<Vec<Week>> {
        let mut weeks = self.weeks.write().await;
        Ok(weeks
            .values_mut()
            .filter(|w| w.user_id == *user_id && w.is_expired(now))
            .map(|w| {
                w.complete(now);
                w.clone()
            })
            .collect())
    }
}

// ============================================================================
// Day comments
// ============================================================================

impl DayCommentRepository for InMemoryScheduleRepository {
    async fn upsert(&self, comment: &DayComment) -> ScheduleResult<DayComment> {
        let mut comments = self.comments.write().await;
        let stored = comments
            .entry((comment.week_id, comment.day_of_week))
            .and_modify(|existing| {
                existing.comment = comment.comment.clone();
                existing.updated_at = comment.updated_at;
            })
            .or_insert_with(|| comment.clone());
        Ok(stored.clone())
    }

    async fn list(&self, week_id: &WeekId) -> ScheduleResult<Vec<DayComment>> {
        let mut comments: Vec<DayComment> = self
            .comments
            .read()
            .await
            .values()
            .filter(|c| c.week_id == *week_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.day_of_week);
        Ok(comments)
    }

    async fn update(
        &self,
        week_id: &WeekId,
        day_of_week: DayOfWeek,
        comment: &str,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Option<DayComment>> {
        let mut comments = self.comments.write().await;
        Ok(comments.get_mut(&(*week_id, day_of_week)).map(|stored| {
            stored.comment = comment.to_string();
            stored.updated_at = now;
            stored.clone()
        }))
    }

    async fn delete(&self, week_id: &WeekId, day_of_week: DayOfWeek) -> ScheduleResult<bool> {
        Ok(self
            .comments
            .write()
            .await
            .remove(&(*week_id, day_of_week))
            .is_some())
    }
}
