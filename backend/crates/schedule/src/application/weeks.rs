//! Week Use Cases
//!
//! Create, list, patch, delete and complete the caller's weeks, plus the
//! sweep that completes weeks whose end has passed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WeekId};
use validator::Validate;

use crate::application::validation::{field_error, parse_instant, validate_instant};
use crate::domain::entities::Week;
use crate::domain::repository::WeekRepository;
use crate::domain::value_objects::WeekPatch;
use crate::error::{ScheduleError, ScheduleResult};

/// Page size of the completed-weeks listing when none (or a non-positive one) is given
pub const DEFAULT_COMPLETED_LIMIT: i64 = 4;

fn parse_opt_instant(
    field: &'static str,
    value: Option<&str>,
) -> ScheduleResult<Option<DateTime<Utc>>> {
    value
        .map(|v| parse_instant(v).map_err(|e| field_error(field, e)))
        .transpose()
}

/// `week_number` is range-checked before this is reached
fn to_week_number(value: i64) -> ScheduleResult<i32> {
    i32::try_from(value).map_err(|_| ScheduleError::Internal("week number out of range".into()))
}

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Default, Validate)]
pub struct CreateWeekInput {
    #[validate(custom(function = "validate_instant"))]
    pub start_date: String,
    #[validate(custom(function = "validate_instant"))]
    pub end_date: String,
    #[validate(
        required(message = "Week number is required"),
        range(min = 1, max = 2147483647, message = "Week number must be a positive integer")
    )]
    pub week_number: Option<i64>,
}

#[derive(Debug, Default, Validate)]
pub struct UpdateWeekInput {
    #[validate(custom(function = "validate_instant"))]
    pub start_date: Option<String>,
    #[validate(custom(function = "validate_instant"))]
    pub end_date: Option<String>,
    #[validate(range(min = 1, max = 2147483647, message = "Week number must be a positive integer"))]
    pub week_number: Option<i64>,
    pub is_active: Option<bool>,
    pub is_completed: Option<bool>,
}

impl UpdateWeekInput {
    fn into_patch(self) -> ScheduleResult<WeekPatch> {
        self.validate()?;

        Ok(WeekPatch {
            start_date: parse_opt_instant("start_date", self.start_date.as_deref())?,
            end_date: parse_opt_instant("end_date", self.end_date.as_deref())?,
            week_number: self.week_number.map(to_week_number).transpose()?,
            is_active: self.is_active,
            is_completed: self.is_completed,
        })
    }
}

/// Result of the expired-weeks sweep
#[derive(Debug)]
pub struct CheckExpiredOutput {
    pub finalized: usize,
    pub weeks: Vec<Week>,
}

// ============================================================================
// List
// ============================================================================

pub struct ListWeeksUseCase<W>
where
    W: WeekRepository,
{
    week_repo: Arc<W>,
}

impl<W> ListWeeksUseCase<W>
where
    W: WeekRepository,
{
    pub fn new(week_repo: Arc<W>) -> Self {
        Self { week_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> ScheduleResult<Vec<Week>> {
        self.week_repo.list(user_id).await
    }
}

pub struct ListCompletedWeeksUseCase<W>
where
    W: WeekRepository,
{
    week_repo: Arc<W>,
}

impl<W> ListCompletedWeeksUseCase<W>
where
    W: WeekRepository,
{
    pub fn new(week_repo: Arc<W>) -> Self {
        Self { week_repo }
    }

    pub async fn execute(&self, user_id: &UserId, limit: Option<i64>) -> ScheduleResult<Vec<Week>> {
        let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_COMPLETED_LIMIT);
        self.week_repo.list_completed(user_id, limit).await
    }
}

// ============================================================================
// Create
// ============================================================================

pub struct CreateWeekUseCase<W>
where
    W: WeekRepository,
{
    week_repo: Arc<W>,
}

impl<W> CreateWeekUseCase<W>
where
    W: WeekRepository,
{
    pub fn new(week_repo: Arc<W>) -> Self {
        Self { week_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: CreateWeekInput) -> ScheduleResult<Week> {
        input.validate()?;

        let start_date = parse_instant(&input.start_date).map_err(|e| field_error("start_date", e))?;
        let end_date = parse_instant(&input.end_date).map_err(|e| field_error("end_date", e))?;
        let week_number = input
            .week_number
            .map(to_week_number)
            .transpose()?
            .ok_or_else(|| ScheduleError::Internal("week number missing after validation".into()))?;

        let week = Week::new(*user_id, start_date, end_date, week_number, Utc::now())?;
        self.week_repo.create(&week).await?;

        tracing::info!(
            user_id = %user_id,
            week_id = %week.week_id,
            week_number = week.week_number,
            "Week created"
        );

        Ok(week)
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateWeekUseCase<W>
where
    W: WeekRepository,
{
    week_repo: Arc<W>,
}

impl<W> UpdateWeekUseCase<W>
where
    W: WeekRepository,
{
    pub fn new(week_repo: Arc<W>) -> Self {
        Self { week_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        week_id: &WeekId,
        input: UpdateWeekInput,
    ) -> ScheduleResult<Week> {
        let patch = input.into_patch()?;

        let mut week = self
            .week_repo
            .find(week_id, user_id)
            .await?
            .ok_or(ScheduleError::WeekNotFound)?;

        week.apply(patch, Utc::now())?;
        if !self.week_repo.update(&week).await? {
            return Err(ScheduleError::WeekNotFound);
        }

        tracing::info!(user_id = %user_id, week_id = %week_id, "Week updated");

        Ok(week)
    }
}

// ============================================================================
// Delete
// ============================================================================

pub struct DeleteWeekUseCase<W>
where
    W: WeekRepository,
{
    week_repo: Arc<W>,
}

impl<W> DeleteWeekUseCase<W>
where
    W: WeekRepository,
{
    pub fn new(week_repo: Arc<W>) -> Self {
        Self { week_repo }
    }

    pub async fn execute(&self, user_id: &UserId, week_id: &WeekId) -> ScheduleResult<()> {
        self.week_repo
            .find(week_id, user_id)
            .await?
            .ok_or(ScheduleError::WeekNotFound)?;

        if !self.week_repo.delete(week_id, user_id).await? {
            return Err(ScheduleError::WeekNotFound);
        }

        tracing::info!(user_id = %user_id, week_id = %week_id, "Week deleted");
        Ok(())
    }
}

// ============================================================================
// Complete
// ============================================================================

pub struct CompleteWeekUseCase<W>
where
    W: WeekRepository,
{
    week_repo: Arc<W>,
}

impl<W> CompleteWeekUseCase<W>
where
    W: WeekRepository,
{
    pub fn new(week_repo: Arc<W>) -> Self {
        Self { week_repo }
    }

    /// Completing an already completed week moves `completed_at` to `now`
    pub async fn execute(
        &self,
        user_id: &UserId,
        week_id: &WeekId,
        now: DateTime<Utc>,
    ) -> ScheduleResult<Week> {
        let mut week = self
            .week_repo
            .find(week_id, user_id)
            .await?
            .ok_or(ScheduleError::WeekNotFound)?;

        week.complete(now);
        if !self.week_repo.update(&week).await? {
            return Err(ScheduleError::WeekNotFound);
        }

        tracing::info!(user_id = %user_id, week_id = %week_id, "Week completed");

        Ok(week)
    }
}

pub struct CheckExpiredWeeksUseCase<W>
where
    W: WeekRepository,
{
    week_repo: Arc<W>,
}

impl<W> CheckExpiredWeeksUseCase<W>
where
    W: WeekRepository,
{
    pub fn new(week_repo: Arc<W>) -> Self {
        Self { week_repo }
    }

    /// Every week completed by this call carries the same `completed_at = now`
    pub async fn execute(&self, user_id: &UserId, now: DateTime<Utc>) -> ScheduleResult<CheckExpiredOutput> {
        let weeks = self.week_repo.complete_expired(user_id, now).await?;

        if !weeks.is_empty() {
            tracing::info!(user_id = %user_id, finalized = weeks.len(), "Expired weeks completed");
        }

        Ok(CheckExpiredOutput {
            finalized: weeks.len(),
            weeks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryScheduleRepository;
    use chrono::{Duration, TimeZone};

    fn week_input(start: &str, end: &str, number: i64) -> CreateWeekInput {
        CreateWeekInput {
            start_date: start.into(),
            end_date: end.into(),
            week_number: Some(number),
        }
    }

    async fn create(repo: &Arc<InMemoryScheduleRepository>, user: &UserId, start: &str, end: &str) -> Week {
        CreateWeekUseCase::new(repo.clone())
            .execute(user, week_input(start, end, 1))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_range() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();

        let err = CreateWeekUseCase::new(repo.clone())
            .execute(
                &user,
                week_input("2024-01-07T00:00:00Z", "2024-01-01T00:00:00Z", 1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange));

        let weeks = ListWeeksUseCase::new(repo).execute(&user).await.unwrap();
        assert!(weeks.is_empty());
    }

    #[tokio::test]
    async fn test_create_validates_fields() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let input = CreateWeekInput {
            start_date: "2024-01-01".into(),
            end_date: "2024-01-07T00:00:00Z".into(),
            week_number: Some(0),
        };

        let err = CreateWeekUseCase::new(repo.clone())
            .execute(&UserId::new(), input)
            .await
            .unwrap_err();
        match err {
            ScheduleError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("start_date"));
                assert!(fields.contains_key("week_number"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let missing = CreateWeekUseCase::new(repo)
            .execute(
                &UserId::new(),
                CreateWeekInput {
                    week_number: None,
                    ..week_input("2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z", 1)
                },
            )
            .await;
        assert!(matches!(missing, Err(ScheduleError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        create(&repo, &user, "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;
        create(&repo, &user, "2024-01-15T00:00:00Z", "2024-01-21T00:00:00Z").await;
        create(&repo, &user, "2024-01-08T00:00:00Z", "2024-01-14T00:00:00Z").await;

        let weeks = ListWeeksUseCase::new(repo).execute(&user).await.unwrap();
        let days: Vec<u32> = weeks
            .iter()
            .map(|w| chrono::Datelike::day(&w.start_date))
            .collect();
        assert_eq!(days, [15, 8, 1]);
    }

    #[tokio::test]
    async fn test_update_patch_and_ownership() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        let week = create(&repo, &user, "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;

        let input = UpdateWeekInput {
            week_number: Some(5),
            end_date: Some("2024-01-08T00:00:00Z".into()),
            ..Default::default()
        };
        let updated = UpdateWeekUseCase::new(repo.clone())
            .execute(&user, &week.week_id, input)
            .await
            .unwrap();
        assert_eq!(updated.week_number, 5);
        assert_eq!(updated.start_date, week.start_date);

        let intruder = UpdateWeekUseCase::new(repo.clone())
            .execute(&UserId::new(), &week.week_id, UpdateWeekInput::default())
            .await;
        assert!(matches!(intruder, Err(ScheduleError::WeekNotFound)));

        let inverted = UpdateWeekUseCase::new(repo)
            .execute(
                &user,
                &week.week_id,
                UpdateWeekInput {
                    start_date: Some("2024-02-01T00:00:00Z".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(inverted, Err(ScheduleError::InvalidRange)));
    }

    #[tokio::test]
    async fn test_complete_and_list_completed() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        let mut ids = Vec::new();
        for _ in 0..6 {
            let week = create(&repo, &user, "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;
            ids.push(week.week_id);
        }
        create(&repo, &user, "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;

        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let complete = CompleteWeekUseCase::new(repo.clone());
        for (minute, id) in ids.iter().enumerate() {
            let at = start + Duration::minutes(minute as i64);
            let week = complete.execute(&user, id, at).await.unwrap();
            assert!(week.is_completed);
            assert!(!week.is_active);
            assert_eq!(week.completed_at, Some(at));
        }

        let list = ListCompletedWeeksUseCase::new(repo.clone());
        assert_eq!(list.execute(&user, Some(1)).await.unwrap()[0].week_id, ids[5]);

        let default_page = list.execute(&user, None).await.unwrap();
        assert_eq!(default_page.len(), 4);
        assert!(
            default_page
                .windows(2)
                .all(|pair| pair[0].completed_at >= pair[1].completed_at)
        );
        assert_eq!(list.execute(&user, Some(10)).await.unwrap().len(), 6);
        assert_eq!(list.execute(&user, Some(0)).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_completing_twice_restamps() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        let week = create(&repo, &user, "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;
        let first_at = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let second_at = first_at + Duration::hours(2);

        let complete = CompleteWeekUseCase::new(repo.clone());
        let first = complete.execute(&user, &week.week_id, first_at).await.unwrap();
        let second = complete.execute(&user, &week.week_id, second_at).await.unwrap();

        assert_eq!(first.completed_at, Some(first_at));
        assert_eq!(second.completed_at, Some(second_at));
        assert!(second.is_completed && !second.is_active);

        let stored = WeekRepository::find(repo.as_ref(), &week.week_id, &user)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.completed_at, Some(second_at));

        let foreign = complete.execute(&UserId::new(), &week.week_id, second_at).await;
        assert!(matches!(foreign, Err(ScheduleError::WeekNotFound)));
    }

    #[tokio::test]
    async fn test_check_expired_completes_only_past_weeks() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();

        let past_a = create(&repo, &user, "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;
        let past_b = create(&repo, &user, "2024-01-08T00:00:00Z", "2024-01-14T00:00:00Z").await;
        let current = create(&repo, &user, "2024-01-15T00:00:00Z", "2024-01-21T00:00:00Z").await;
        let other_user = create(&repo, &UserId::new(), "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;

        let output = CheckExpiredWeeksUseCase::new(repo.clone())
            .execute(&user, now)
            .await
            .unwrap();

        assert_eq!(output.finalized, 2);
        let mut finalized: Vec<WeekId> = output.weeks.iter().map(|w| w.week_id).collect();
        finalized.sort_by_key(|id| id.to_string());
        let mut expected = vec![past_a.week_id, past_b.week_id];
        expected.sort_by_key(|id| id.to_string());
        assert_eq!(finalized, expected);
        assert!(output.weeks.iter().all(|w| {
            w.is_completed && !w.is_active && w.completed_at == Some(now)
        }));

        let weeks = ListWeeksUseCase::new(repo.clone()).execute(&user).await.unwrap();
        let untouched = weeks.iter().find(|w| w.week_id == current.week_id).unwrap();
        assert!(untouched.is_active);
        assert!(!untouched.is_completed);

        let foreign = ListWeeksUseCase::new(repo.clone())
            .execute(&other_user.user_id)
            .await
            .unwrap();
        assert!(foreign[0].is_active);

        let second = CheckExpiredWeeksUseCase::new(repo)
            .execute(&user, now + Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(second.finalized, 0);
    }

    #[tokio::test]
    async fn test_delete_week() {
        let repo = Arc::new(InMemoryScheduleRepository::new());
        let user = UserId::new();
        let week = create(&repo, &user, "2024-01-01T00:00:00Z", "2024-01-07T00:00:00Z").await;

        let intruder = DeleteWeekUseCase::new(repo.clone())
            .execute(&UserId::new(), &week.week_id)
            .await;
        assert!(matches!(intruder, Err(ScheduleError::WeekNotFound)));

        DeleteWeekUseCase::new(repo.clone())
            .execute(&user, &week.week_id)
            .await
            .unwrap();
        assert!(ListWeeksUseCase::new(repo).execute(&user).await.unwrap().is_empty());
    }
}
