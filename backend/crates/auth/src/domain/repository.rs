//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user. Fails with `EmailTaken` if the email is already stored.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Persist every mutable field of `user`
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete a user and, by cascade, everything they own.
    /// Returns false when no row matched.
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
