//! Accounts as seen by the schedule crate

use auth::domain::repository::UserRepository;
use kernel::id::UserId;
use schedule::domain::repository::UserDirectory;
use schedule::{ScheduleError, ScheduleResult};

/// Answers schedule's account lookups from the auth user store
#[derive(Clone)]
pub struct AccountDirectory<U>(pub U);

impl<U> UserDirectory for AccountDirectory<U>
where
    U: UserRepository + Send + Sync,
{
    async fn user_exists(&self, user_id: &UserId) -> ScheduleResult<bool> {
        self.0
            .find_by_id(user_id)
            .await
            .map(|user| user.is_some())
            .map_err(|e| ScheduleError::Internal(e.to_string()))
    }
}
