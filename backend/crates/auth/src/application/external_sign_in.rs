//! External Identity Sign In Use Case
//!
//! Exchanges an authorization code with the identity provider, links the
//! identity to an account by email (creating it on first sign-in), and
//! issues the same kind of token as a local login.

use std::sync::Arc;

use platform::token::TokenCodec;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::identity::IdentityProvider;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::provider_link::ProviderLink;
use crate::error::{AuthError, AuthResult};

/// Display name for provider accounts without one
pub const DEFAULT_PROVIDER_NAME: &str = "Google User";

#[derive(Debug)]
pub struct ExternalSignInOutput {
    pub user: User,
    pub token: String,
    /// True when this sign-in created the account
    pub created: bool,
}

pub struct ExternalSignInUseCase<U, P>
where
    U: UserRepository,
    P: IdentityProvider,
{
    user_repo: Arc<U>,
    provider: Arc<P>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U, P> ExternalSignInUseCase<U, P>
where
    U: UserRepository,
    P: IdentityProvider,
{
    pub fn new(
        user_repo: Arc<U>,
        provider: Arc<P>,
        tokens: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            provider,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, code: &str) -> AuthResult<ExternalSignInOutput> {
        if code.trim().is_empty() {
            return Err(AuthError::MissingAuthorizationCode);
        }

        let identity = self.provider.exchange_code(code).await?;

        let (user, created) = match self.user_repo.find_by_email(&identity.email).await? {
            None => {
                let user = User::from_provider(
                    identity
                        .name
                        .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string()),
                    identity.email,
                    identity.avatar,
                    ProviderLink {
                        subject: identity.subject,
                        access_token: identity.access_token,
                        refresh_token: identity.refresh_token,
                    },
                );
                self.user_repo.create(&user).await?;
                (user, true)
            }
            Some(mut user) => {
                if let Some(name) = identity.name {
                    user.name = name;
                }
                if identity.avatar.is_some() {
                    user.avatar = identity.avatar;
                }
                match user.google.as_mut() {
                    Some(link) => link.refresh(
                        identity.subject,
                        identity.access_token,
                        identity.refresh_token,
                    ),
                    None => {
                        user.google = Some(ProviderLink {
                            subject: identity.subject,
                            access_token: identity.access_token,
                            refresh_token: identity.refresh_token,
                        })
                    }
                }
                user.touch();
                self.user_repo.update(&user).await?;
                (user, false)
            }
        };

        let token = self
            .tokens
            .issue(user.user_id, &user.email, self.config.external_token_ttl)?;

        tracing::info!(user_id = %user.user_id, created, "External identity signed in");

        Ok(ExternalSignInOutput {
            user,
            token,
            created,
        })
    }
}
