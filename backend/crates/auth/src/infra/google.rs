//! Google OAuth 2.0 identity provider
//!
//! Authorization-code flow: consent URL, code exchange at the token
//! endpoint, then claims from the OpenID userinfo endpoint.

use reqwest::Url;
use serde::Deserialize;

use crate::application::config::GoogleConfig;
use crate::domain::identity::{ExternalIdentity, IdentityProvider};
use crate::error::{AuthError, AuthResult};

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";
/// Calendar access is what the stored access and refresh tokens are for
const SCOPES: &str = "openid email profile https://www.googleapis.com/auth/calendar";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[derive(Clone)]
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn exchange_token(&self, code: &str) -> AuthResult<TokenResponse> {
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AuthError::IdentityProvider(format!("Failed to exchange code: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::IdentityProvider(format!(
                "Token endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::IdentityProvider(format!("Failed to parse token response: {e}")))
    }

    async fn fetch_user_info(&self, access_token: &str) -> AuthResult<UserInfo> {
        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::IdentityProvider(format!("Failed to fetch userinfo: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::IdentityProvider(format!(
                "Userinfo endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::IdentityProvider(format!("Failed to parse userinfo: {e}")))
    }
}

impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self) -> AuthResult<String> {
        let url = Url::parse_with_params(
            AUTHORIZATION_ENDPOINT,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| AuthError::Internal(format!("Invalid authorization URL: {e}")))?;

        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> AuthResult<ExternalIdentity> {
        let tokens = self.exchange_token(code).await?;
        let info = self.fetch_user_info(&tokens.access_token).await?;

        let email = info.email.ok_or_else(|| {
            AuthError::IdentityProvider("Google did not return an email".to_string())
        })?;

        tracing::debug!(subject = %info.sub, "Google code exchanged");

        Ok(ExternalIdentity {
            subject: info.sub,
            email,
            name: info.name,
            avatar: info.picture,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}
