//! Activity Use Cases
//!
//! List, create, replace, delete and toggle the caller's activities. Every
//! operation on an existing activity looks it up by `(id, caller)` first and
//! answers `ActivityNotFound` for ids the caller does not own.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{ActivityId, UserId};
use validator::Validate;

use crate::application::validation::{
    field_error, parse_activity_type, parse_date, validate_activity_type, validate_date,
};
use crate::domain::entities::Activity;
use crate::domain::repository::ActivityRepository;
use crate::domain::value_objects::{ActivityDetails, ActivityFilter};
use crate::error::{ScheduleError, ScheduleResult};

// ============================================================================
// Inputs
// ============================================================================

/// Body of create and update (update replaces every editable field)
#[derive(Debug, Default, Validate)]
pub struct ActivityInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_activity_type"))]
    pub activity_type: String,
    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,
    #[validate(length(min = 1, message = "End time is required"))]
    pub end_time: String,
    #[validate(custom(function = "validate_date"))]
    pub date: String,
}

impl ActivityInput {
    fn into_details(self) -> ScheduleResult<ActivityDetails> {
        self.validate()?;

        Ok(ActivityDetails {
            activity_type: parse_activity_type(&self.activity_type)
                .map_err(|e| field_error("activity_type", e))?,
            date: parse_date(&self.date).map_err(|e| field_error("date", e))?,
            title: self.title,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
        })
    }
}

/// Query filters for listing
#[derive(Debug, Default, Validate)]
pub struct ListActivitiesInput {
    #[validate(custom(function = "validate_date"))]
    pub date: Option<String>,
    #[validate(custom(function = "validate_date"))]
    pub start_date: Option<String>,
    #[validate(custom(function = "validate_date"))]
    pub end_date: Option<String>,
}

impl ListActivitiesInput {
    fn into_filter(self) -> ScheduleResult<ActivityFilter> {
        self.validate()?;

        let parse = |field: &'static str, value: Option<String>| {
            value
                .map(|v| parse_date(&v).map_err(|e| field_error(field, e)))
                .transpose()
        };

        Ok(ActivityFilter::from_parts(
            parse("date", self.date)?,
            parse("start_date", self.start_date)?,
            parse("end_date", self.end_date)?,
        ))
    }
}

// ============================================================================
// List
// ============================================================================

pub struct ListActivitiesUseCase<A>
where
    A: ActivityRepository,
{
    activity_repo: Arc<A>,
}

impl<A> ListActivitiesUseCase<A>
where
    A: ActivityRepository,
{
    pub fn new(activity_repo: Arc<A>) -> Self {
        Self { activity_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: ListActivitiesInput) -> ScheduleResult<Vec<Activity>> {
        let filter = input.into_filter()?;
        self.activity_repo.list(user_id, &filter).await
    }
}

// ============================================================================
// Create
// ============================================================================

pub struct CreateActivityUseCase<A>
where
    A: ActivityRepository,
{
    activity_repo: Arc<A>,
}

impl<A> CreateActivityUseCase<A>
where
    A: ActivityRepository,
{
    pub fn new(activity_repo: Arc<A>) -> Self {
        Self { activity_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: ActivityInput) -> ScheduleResult<Activity> {
        let details = input.into_details()?;

        let activity = Activity::new(*user_id, details, Utc::now());
        self.activity_repo.create(&activity).await?;

        tracing::info!(
            user_id = %user_id,
            activity_id = %activity.activity_id,
            "Activity created"
        );

        Ok(activity)
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateActivityUseCase<A>
where
    A: ActivityRepository,
{
    activity_repo: Arc<A>,
}

impl<A> UpdateActivityUseCase<A>
where
    A: ActivityRepository,
{
    pub fn new(activity_repo: Arc<A>) -> Self {
        Self { activity_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        activity_id: &ActivityId,
        input: ActivityInput,
    ) -> ScheduleResult<Activity> {
        let details = input.into_details()?;

        let mut activity = self
            .activity_repo
            .find(activity_id, user_id)
            .await?
            .ok_or(ScheduleError::ActivityNotFound)?;

        activity.apply(details, Utc::now());
        if !self.activity_repo.update(&activity).await? {
            return Err(ScheduleError::ActivityNotFound);
        }

        tracing::info!(user_id = %user_id, activity_id = %activity_id, "Activity updated");

        Ok(activity)
    }
}

// ============================================================================
// Delete
// ============================================================================

pub struct DeleteActivityUseCase<A>
where
    A: ActivityRepository,
{
    activity_repo: Arc<A>,
}

impl<A> DeleteActivityUseCase<A>
where
    A: ActivityRepository,
{
    pub fn new(activity_repo: Arc<A>) -> Self {
        Self { activity_repo }
    }

    pub async fn execute(&self, user_id: &UserId, activity_id: &ActivityId) -> ScheduleResult<()> {
        self.activity_repo
            .find(activity_id, user_id)
            .await?
            .ok_or(ScheduleError::ActivityNotFound)?;

        if !self.activity_repo.delete(activity_id, user_id).await? {
            return Err(ScheduleError::ActivityNotFound);
        }

        tracing::info!(user_id = %user_id, activity_id = %activity_id, "Activity deleted");
        Ok(())
    }
}

// ============================================================================
// Toggle
// ============================================================================

pub struct ToggleActivityUseCase<A>
where
    A: ActivityRepository,
{
    activity_repo: Arc<A>,
}

impl<A> ToggleActivityUseCase<A>
where
    A: ActivityRepository,
{
    pub fn new(activity_repo: Arc<A>) -> Self {
        Self { activity_repo }
    }

    pub async fn execute(&self, user_id: &UserId, activity_id: &ActivityId) -> ScheduleResult<Activity> {
        self.activity_repo
            .find(activity_id, user_id)
            .await?
            .ok_or(ScheduleError::ActivityNotFound)?;

        let activity = self
            .activity_repo
            .toggle(activity_id, user_id, Utc::now())
            .await?
            .ok_or(ScheduleError::ActivityNotFound)?;

        tracing::info!(
            user_id = %user_id,
            activity_id = %activity_id,
            completed = activity.completed,
            "Activity toggled"
        );

        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryScheduleRepository;

    fn run_input() -> ActivityInput {
        ActivityInput {
            title: "Run".into(),
            description: None,
            activity_type: "SAUDE".into(),
            start_time: "07:00".into(),
            end_time: "08:00".into(),
            date: "2024-01-01".into(),
        }
    }

    async fn seeded(repo: &Arc<InMemoryScheduleRepository>, user: &UserId, date: &str, start: &str) -> Activity {
        let input = ActivityInput {
            date: date.into(),
            start_time: start.into(),
            ..run_input()
        };
        CreateActivityUseCase::new(repo.clone())
            .execute(user, input)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_to_not_completed() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();

        let activity = CreateActivityUseCase::new(repo.clone())
            .execute(&user, run_input())
            .await
            .unwrap();

        assert!(!activity.completed);
        assert_eq!(activity.user_id, user);
        assert_eq!(activity.details.title, "Run");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_fields() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let input = ActivityInput {
            title: String::new(),
            activity_type: "RUNNING".into(),
            date: "01/01/2024".into(),
            ..run_input()
        };

        let err = CreateActivityUseCase::new(repo.clone())
            .execute(&UserId::new(), input)
            .await
            .unwrap_err();

        match err {
            ScheduleError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("title"));
                assert!(fields.contains_key("activity_type"));
                assert!(fields.contains_key("date"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        seeded(&repo, &user, "2024-01-01", "09:00").await;
        seeded(&repo, &user, "2024-01-01", "07:00").await;
        seeded(&repo, &user, "2024-01-03", "08:00").await;
        seeded(&repo, &UserId::new(), "2024-01-01", "06:00").await;

        let list = ListActivitiesUseCase::new(repo.clone());

        let on_day = list
            .execute(
                &user,
                ListActivitiesInput {
                    date: Some("2024-01-01".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let starts: Vec<&str> = on_day.iter().map(|a| a.details.start_time.as_str()).collect();
        assert_eq!(starts, ["07:00", "09:00"]);

        let from_second = list
            .execute(
                &user,
                ListActivitiesInput {
                    start_date: Some("2024-01-02".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(from_second.len(), 1);

        let all = list.execute(&user, ListActivitiesInput::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_filter() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let err = ListActivitiesUseCase::new(repo)
            .execute(
                &UserId::new(),
                ListActivitiesInput {
                    end_date: Some("tomorrow".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        let activity = seeded(&repo, &user, "2024-01-01", "07:00").await;

        let input = ActivityInput {
            title: "Swim".into(),
            description: Some("pool".into()),
            ..run_input()
        };
        let updated = UpdateActivityUseCase::new(repo.clone())
            .execute(&user, &activity.activity_id, input)
            .await
            .unwrap();

        assert_eq!(updated.details.title, "Swim");
        assert_eq!(updated.details.description.as_deref(), Some("pool"));
        assert_eq!(updated.activity_id, activity.activity_id);
    }

    #[tokio::test]
    async fn test_foreign_activity_is_not_found() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let owner = UserId::new();
        let intruder = UserId::new();
        let activity = seeded(&repo, &owner, "2024-01-01", "07:00").await;
        let id = activity.activity_id;

        let update = UpdateActivityUseCase::new(repo.clone())
            .execute(&intruder, &id, run_input())
            .await;
        assert!(matches!(update, Err(ScheduleError::ActivityNotFound)));

        let toggle = ToggleActivityUseCase::new(repo.clone())
            .execute(&intruder, &id)
            .await;
        assert!(matches!(toggle, Err(ScheduleError::ActivityNotFound)));

        let delete = DeleteActivityUseCase::new(repo.clone())
            .execute(&intruder, &id)
            .await;
        assert!(matches!(delete, Err(ScheduleError::ActivityNotFound)));

        let still_there = ListActivitiesUseCase::new(repo)
            .execute(&owner, ListActivitiesInput::default())
            .await
            .unwrap();
        assert_eq!(still_there, vec![activity]);
    }

    #[tokio::test]
    async fn test_toggle_and_delete() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        let activity = seeded(&repo, &user, "2024-01-01", "07:00").await;

        let toggled = ToggleActivityUseCase::new(repo.clone())
            .execute(&user, &activity.activity_id)
            .await
            .unwrap();
        assert!(toggled.completed);

        DeleteActivityUseCase::new(repo.clone())
            .execute(&user, &activity.activity_id)
            .await
            .unwrap();

        let again = DeleteActivityUseCase::new(repo)
            .execute(&user, &activity.activity_id)
            .await;
        assert!(matches!(again, Err(ScheduleError::ActivityNotFound)));
    }
}
