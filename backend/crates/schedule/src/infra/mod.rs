//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryScheduleRepository;
pub use postgres::PgScheduleRepository;
