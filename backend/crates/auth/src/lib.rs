//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits, identity-provider port
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations and the Google OAuth client
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration and login with email + password
//! - Profile read / partial update / delete, password change
//! - Google sign-in linking to accounts by email
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never returned by any endpoint
//! - Stateless HS256 bearer tokens (1 hour, 7 days for Google sign-in)
//! - Duplicate emails rejected before insert and by the unique index

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, GoogleConfig};
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryUserRepository;
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{
    auth_router, auth_router_generic, google_router, google_router_generic,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

#[cfg(test)]
mod tests;
