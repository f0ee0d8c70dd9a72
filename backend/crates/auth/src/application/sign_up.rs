//! Sign Up Use Case
//!
//! Creates a new local account and issues its first token.

use std::sync::Arc;

use platform::token::TokenCodec;
use validator::Validate;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Sign up input
#[derive(Validate)]
pub struct SignUpInput {
    #[validate(length(max = 20, message = "The name must have a maximum of 20 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 4, message = "Password must have at least 4 characters"))]
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    pub token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(input.name, input.email, password);
        self.user_repo.create(&user).await?;

        let token = self
            .tokens
            .issue(user.user_id, &user.email, self.config.token_ttl)?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case(repo: &InMemoryUserRepository) -> SignUpUseCase<InMemoryUserRepository> {
        SignUpUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(TokenCodec::new("test-secret").unwrap()),
            Arc::new(AuthConfig::default()),
        )
    }

    fn ann() -> SignUpInput {
        SignUpInput {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password: "pass1234".into(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_hash_and_issues_token() {
        let repo = InMemoryUserRepository::new();
        let output = use_case(&repo).execute(ann()).await.unwrap();

        let stored = repo.find_by_email("ann@x.com").await.unwrap().unwrap();
        let hash = stored.password.unwrap();
        assert_ne!(hash.as_phc_string(), "pass1234");

        let claims = TokenCodec::new("test-secret")
            .unwrap()
            .verify(&output.token)
            .unwrap();
        assert_eq!(claims.user_id, output.user.user_id);
        assert_eq!(claims.email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        let sign_up = use_case(&repo);

        sign_up.execute(ann()).await.unwrap();
        let second = sign_up.execute(ann()).await;

        assert!(matches!(second, Err(AuthError::EmailTaken)));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_validation_runs_before_persistence() {
        let repo = InMemoryUserRepository::new();
        let result = use_case(&repo)
            .execute(SignUpInput {
                name: "a name that is far too long".into(),
                email: "not-an-email".into(),
                password: "abc".into(),
            })
            .await;

        let Err(AuthError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert_eq!(repo.count().await, 0);
    }
}
