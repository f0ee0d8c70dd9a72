//! Value Objects
//!
//! Immutable objects defined by their attributes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ActivityType
// ============================================================================

/// Category of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Pessoal,
    Trabalho,
    Estudo,
    Saude,
    Outro,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Pessoal,
        ActivityType::Trabalho,
        ActivityType::Estudo,
        ActivityType::Saude,
        ActivityType::Outro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Pessoal => "PESSOAL",
            ActivityType::Trabalho => "TRABALHO",
            ActivityType::Estudo => "ESTUDO",
            ActivityType::Saude => "SAUDE",
            ActivityType::Outro => "OUTRO",
        }
    }
}

impl FromStr for ActivityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ActivityDetails
// ============================================================================

/// User-editable part of an activity, shared by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDetails {
    pub title: String,
    pub description: Option<String>,
    pub activity_type: ActivityType,
    /// Time of day (`HH:MM`, `HH:MM:SS`) or a full RFC 3339 instant
    pub start_time: String,
    pub end_time: String,
    pub date: NaiveDate,
}

// ============================================================================
// ActivityFilter
// ============================================================================

/// Which of the caller's activities to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    /// Exactly one calendar date
    On(NaiveDate),
    /// Inclusive range; either bound may be open
    Between {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl ActivityFilter {
    /// An exact date wins over range bounds
    pub fn from_parts(
        date: Option<NaiveDate>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        match (date, from, to) {
            (Some(date), _, _) => ActivityFilter::On(date),
            (None, None, None) => ActivityFilter::All,
            (None, from, to) => ActivityFilter::Between { from, to },
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            ActivityFilter::All => true,
            ActivityFilter::On(day) => date == day,
            ActivityFilter::Between { from, to } => {
                from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
            }
        }
    }
}

// ============================================================================
// DayOfWeek
// ============================================================================

/// Day index inside a week, `0..=6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const MAX: u8 = 6;

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

// ============================================================================
// WeekPatch
// ============================================================================

/// Partial week update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct WeekPatch {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub week_number: Option<i32>,
    pub is_active: Option<bool>,
    pub is_completed: Option<bool>,
}
