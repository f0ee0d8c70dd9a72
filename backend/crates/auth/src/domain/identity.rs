//! External Identity Port
//!
//! An identity provider turns an OAuth authorization code into verified
//! identity claims. The Google implementation lives in `infra::google`.

use crate::error::AuthResult;

/// Identity claims returned by the provider after a code exchange
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    /// Provider subject id
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Consent page the browser is redirected to
    fn authorization_url(&self) -> AuthResult<String>;

    /// Exchange an authorization code for identity claims
    async fn exchange_code(&self, code: &str) -> AuthResult<ExternalIdentity>;
}
