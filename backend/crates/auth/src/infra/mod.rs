//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod google;
pub mod memory;
pub mod postgres;

pub use google::GoogleIdentityProvider;
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
