//! User Stats Use Case

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::repository::{ActivityRepository, UserDirectory};
use crate::domain::services::UserStats;
use crate::domain::value_objects::ActivityFilter;
use crate::error::{ScheduleError, ScheduleResult};

pub struct UserStatsUseCase<A, D>
where
    A: ActivityRepository,
    D: UserDirectory,
{
    activity_repo: Arc<A>,
    directory: Arc<D>,
}

impl<A, D> UserStatsUseCase<A, D>
where
    A: ActivityRepository,
    D: UserDirectory,
{
    pub fn new(activity_repo: Arc<A>, directory: Arc<D>) -> Self {
        Self {
            activity_repo,
            directory,
        }
    }

    /// A valid token for a deleted account yields `UserNotFound`
    pub async fn execute(&self, user_id: &UserId, now: DateTime<Utc>) -> ScheduleResult<UserStats> {
        if !self.directory.user_exists(user_id).await? {
            return Err(ScheduleError::UserNotFound);
        }

        let activities = self.activity_repo.list(user_id, &ActivityFilter::All).await?;
        Ok(UserStats::compute(&activities, now))
    }
}
