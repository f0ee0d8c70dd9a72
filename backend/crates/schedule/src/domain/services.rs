//! Domain Services
//!
//! Aggregate statistics over a user's activities.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::entities::Activity;
use crate::domain::value_objects::ActivityType;

/// Reported when the user has no activities
pub const NO_FAVORITE: &str = "N/A";

/// Streak is `total / STREAK_DIVISOR`, capped at `MAX_STREAK_DAYS`
const STREAK_DIVISOR: usize = 3;
const MAX_STREAK_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub total_activities: usize,
    pub completed_activities: usize,
    pub pending_activities: usize,
    pub streak_days: usize,
    pub total_hours: i64,
    pub favorite_activity_type: String,
}

impl UserStats {
    pub fn compute(activities: &[Activity], now: DateTime<Utc>) -> Self {
        let total_activities = activities.len();

        let mut completed_activities = 0;
        let mut total_seconds: i64 = 0;
        for activity in activities {
            let details = &activity.details;
            let start = resolve_instant(details.date, &details.start_time);
            let end = resolve_instant(details.date, &details.end_time);

            if end.is_some_and(|end| end < now) {
                completed_activities += 1;
            }
            if let (Some(start), Some(end)) = (start, end) {
                total_seconds += (end - start).num_seconds();
            }
        }

        Self {
            total_activities,
            completed_activities,
            pending_activities: total_activities - completed_activities,
            streak_days: (total_activities / STREAK_DIVISOR).min(MAX_STREAK_DAYS),
            total_hours: (total_seconds as f64 / 3600.0).round() as i64,
            favorite_activity_type: favorite_type(activities)
                .map(|t| t.as_str().to_string())
                .unwrap_or_else(|| NO_FAVORITE.to_string()),
        }
    }
}

/// `date` + time of day, or a full RFC 3339 instant
fn resolve_instant(date: NaiveDate, time: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(time) {
        return Some(instant.with_timezone(&Utc));
    }

    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()
        .map(|t| date.and_time(t).and_utc())
}

/// Most frequent type
///
/// Counts are kept in first-encounter order and stably sorted ascending by
/// frequency; the last entry wins. On a tie this picks the tied type whose
/// first occurrence came latest.
fn favorite_type(activities: &[Activity]) -> Option<ActivityType> {
    let mut counts: Vec<(ActivityType, usize)> = Vec::new();
    for activity in activities {
        let kind = activity.activity_type();
        match counts.iter_mut().find(|(t, _)| *t == kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((kind, 1)),
        }
    }

    counts.sort_by_key(|(_, count)| *count);
    counts.last().map(|(t, _)| *t)
}
