//! Sign In Use Case
//!
//! Verifies email + password and issues a token.

use std::sync::Arc;

use platform::token::TokenCodec;
use validator::Validate;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::RawPassword;
use crate::error::{AuthError, AuthResult};

/// Sign in input
#[derive(Validate)]
pub struct SignInInput {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 4, message = "Password must have at least 4 characters"))]
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub token: String,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Accounts created through Google have no local password
        let Some(stored) = user.password.as_ref() else {
            return Err(AuthError::InvalidCredentials);
        };
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        if !stored.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.user_id, &user.email, self.config.token_ttl)?;

        let profile = self.user_repo.find_by_id(&user.user_id).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            token,
            user: profile.unwrap_or(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::infra::memory::InMemoryUserRepository;

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        tokens: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    }

    impl Fixture {
        async fn with_ann() -> Self {
            let fixture = Self {
                repo: Arc::new(InMemoryUserRepository::new()),
                tokens: Arc::new(TokenCodec::new("test-secret").unwrap()),
                config: Arc::new(AuthConfig {
                    password_pepper: Some(b"pepper".to_vec()),
                    ..AuthConfig::default()
                }),
            };
            SignUpUseCase::new(
                fixture.repo.clone(),
                fixture.tokens.clone(),
                fixture.config.clone(),
            )
            .execute(SignUpInput {
                name: "Ann".into(),
                email: "ann@x.com".into(),
                password: "pass1234".into(),
            })
            .await
            .unwrap();
            fixture
        }

        fn sign_in(&self) -> SignInUseCase<InMemoryUserRepository> {
            SignInUseCase::new(self.repo.clone(), self.tokens.clone(), self.config.clone())
        }
    }

    fn input(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_correct_credentials() {
        let fixture = Fixture::with_ann().await;
        let output = fixture
            .sign_in()
            .execute(input("ann@x.com", "pass1234"))
            .await
            .unwrap();

        let claims = fixture.tokens.verify(&output.token).unwrap();
        assert_eq!(claims.user_id, output.user.user_id);
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(output.user.name, "Ann");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let fixture = Fixture::with_ann().await;
        let result = fixture
            .sign_in()
            .execute(input("ann@x.com", "wrong-pass"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let fixture = Fixture::with_ann().await;
        let result = fixture
            .sign_in()
            .execute(input("bob@x.com", "pass1234"))
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_invalid_input_short_circuits() {
        let fixture = Fixture::with_ann().await;
        let result = fixture.sign_in().execute(input("ann", "abc")).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }
}
