//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Token lifetime for register/login (1 hour)
    pub token_ttl: Duration,
    /// Token lifetime for external-identity sign-in (7 days)
    pub external_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600),
            external_token_ttl: Duration::from_secs(7 * 24 * 3600),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl", &self.token_ttl)
            .field("external_token_ttl", &self.external_token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Google OAuth client configuration
#[derive(Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback registered with Google (`.../api/auth/google/callback`)
    pub redirect_uri: String,
    /// Frontend base the callback redirects to with `?token=`
    pub frontend_redirect_uri: String,
}

impl GoogleConfig {
    /// Where the browser lands after a successful sign-in
    pub fn frontend_callback(&self, token: &str) -> String {
        format!(
            "{}/auth/callback?token={}",
            self.frontend_redirect_uri.trim_end_matches('/'),
            token
        )
    }
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("frontend_redirect_uri", &self.frontend_redirect_uri)
            .finish()
    }
}
