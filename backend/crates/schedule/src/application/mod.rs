//! Application Layer
//!
//! Use cases and their validated inputs.

pub mod activities;
pub mod day_comments;
pub mod user_stats;
pub mod validation;
pub mod weeks;

// Re-exports
pub use activities::{
    ActivityInput, CreateActivityUseCase, DeleteActivityUseCase, ListActivitiesInput,
    ListActivitiesUseCase, ToggleActivityUseCase, UpdateActivityUseCase,
};
pub use day_comments::{
    DeleteDayCommentUseCase, ListDayCommentsUseCase, UpdateDayCommentInput,
    UpdateDayCommentUseCase, UpsertDayCommentInput, UpsertDayCommentUseCase, parse_day,
};
pub use user_stats::UserStatsUseCase;
pub use weeks::{
    CheckExpiredOutput, CheckExpiredWeeksUseCase, CompleteWeekUseCase, CreateWeekInput,
    CreateWeekUseCase, DeleteWeekUseCase, ListCompletedWeeksUseCase, ListWeeksUseCase,
    UpdateWeekInput, UpdateWeekUseCase,
};
