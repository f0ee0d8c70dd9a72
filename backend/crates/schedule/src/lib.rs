//! Schedule Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, statistics, repository traits
//! - `application/` - Use cases and their validated inputs
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Activities: list (by date or date range), create, replace, delete, toggle
//! - Weeks: create, list, patch, delete, complete, sweep expired weeks
//! - Day comments: one per `(week, day)`, upserted
//! - User statistics over the caller's activities
//!
//! ## Ownership
//! Every route needs a bearer token. Resources are looked up by id and the
//! caller's user id together; a resource owned by someone else is reported
//! as not found.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ScheduleError, ScheduleResult};
pub use infra::memory::InMemoryScheduleRepository;
pub use infra::postgres::PgScheduleRepository;
pub use presentation::router::{schedule_router, schedule_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::services::UserStats;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
