//! Domain Layer
//!
//! Contains entities, value objects, statistics and repository traits.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{Activity, DayComment, Week};
pub use repository::{ActivityRepository, DayCommentRepository, UserDirectory, WeekRepository};
pub use services::UserStats;
pub use value_objects::{ActivityDetails, ActivityFilter, ActivityType, DayOfWeek, WeekPatch};
