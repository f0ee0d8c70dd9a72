//! External identity linkage stored on a user (Google account id and tokens).

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct ProviderLink {
    /// Provider subject id
    pub subject: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl ProviderLink {
    /// Replace the tokens after a repeat sign-in.
    ///
    /// Providers only return a refresh token on first consent, so an absent
    /// one keeps the stored value.
    pub fn refresh(&mut self, subject: String, access_token: String, refresh_token: Option<String>) {
        self.subject = subject;
        self.access_token = access_token;
        if refresh_token.is_some() {
            self.refresh_token = refresh_token;
        }
    }
}

impl fmt::Debug for ProviderLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderLink")
            .field("subject", &self.subject)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_keeps_old_refresh_token() {
        let mut link = ProviderLink {
            subject: "sub-1".into(),
            access_token: "a1".into(),
            refresh_token: Some("r1".into()),
        };

        link.refresh("sub-1".into(), "a2".into(), None);
        assert_eq!(link.access_token, "a2");
        assert_eq!(link.refresh_token.as_deref(), Some("r1"));

        link.refresh("sub-1".into(), "a3".into(), Some("r2".into()));
        assert_eq!(link.refresh_token.as_deref(), Some("r2"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let link = ProviderLink {
            subject: "sub-1".into(),
            access_token: "ya29.secret".into(),
            refresh_token: Some("1//secret".into()),
        };
        let debug = format!("{link:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("sub-1"));
    }
}
