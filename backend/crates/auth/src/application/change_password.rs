//! Change Password Use Case

use std::sync::Arc;

use kernel::id::UserId;
use validator::Validate;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Validate)]
pub struct ChangePasswordInput {
    #[validate(length(min = 4, message = "Current password must have at least 4 characters"))]
    pub current_password: String,
    #[validate(length(min = 4, message = "New password must have at least 4 characters"))]
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, input: ChangePasswordInput) -> AuthResult<()> {
        input.validate()?;

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let current =
            RawPassword::new(input.current_password).map_err(|_| AuthError::InvalidCredentials)?;
        let verified = user
            .password
            .as_ref()
            .is_some_and(|stored| stored.verify(&current, self.config.pepper()));
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let new_password = RawPassword::new(input.new_password)?;
        user.set_password(UserPassword::from_raw(&new_password, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}
