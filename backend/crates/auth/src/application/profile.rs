//! Profile Use Cases
//!
//! Read, partially update and delete the caller's own account.

use std::sync::Arc;

use kernel::id::UserId;
use validator::{Validate, ValidationError};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::preferences::{Language, Preferences, Theme};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Inputs
// ============================================================================

/// Partial profile update. Only present fields are applied.
#[derive(Debug, Default, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 50, message = "Name must have between 1 and 50 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub avatar: Option<String>,
    #[validate(nested)]
    pub preferences: Option<PreferencesInput>,
}

#[derive(Debug, Default, Validate)]
pub struct PreferencesInput {
    #[validate(custom(function = "validate_theme"))]
    pub theme: Option<String>,
    #[validate(custom(function = "validate_language"))]
    pub language: Option<String>,
    pub notifications: Option<bool>,
    pub timezone: Option<String>,
    pub date_format: Option<String>,
}

fn validate_theme(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Theme>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("theme").with_message("Expected light, dark or auto".into()))
}

fn validate_language(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Language>()
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("language").with_message("Expected pt-BR, en-US or es".into())
        })
}

impl PreferencesInput {
    /// Only call after `validate()`; unknown enum values are dropped.
    fn into_patch(self) -> Preferences {
        Preferences {
            theme: self.theme.and_then(|t| t.parse().ok()),
            language: self.language.and_then(|l| l.parse().ok()),
            notifications: self.notifications,
            timezone: self.timezone,
            date_format: self.date_format,
        }
    }
}

// ============================================================================
// Get
// ============================================================================

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<User> {
        input.validate()?;

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(email) = &input.email {
            if let Some(owner) = self.user_repo.find_by_email(email).await? {
                if owner.user_id != *user_id {
                    return Err(AuthError::EmailTaken);
                }
            }
        }

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(avatar) = input.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(preferences) = input.preferences {
            user.merge_preferences(preferences.into_patch());
        }
        user.touch();

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(user)
    }
}

// ============================================================================
// Delete
// ============================================================================

pub struct DeleteProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        if !self.user_repo.delete(user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "Account deleted");

        Ok(())
    }
}
