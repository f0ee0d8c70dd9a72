//! Domain Layer
//!
//! Contains entities, value objects, identity-provider port and repository traits.

pub mod entity;
pub mod identity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use identity::{ExternalIdentity, IdentityProvider};
pub use repository::UserRepository;
