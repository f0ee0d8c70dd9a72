//! User Entity
//!
//! Account profile plus credentials. Never serialized directly; the
//! presentation layer maps it to a response without password or provider
//! tokens.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    preferences::Preferences, provider_link::ProviderLink, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Unique, case-sensitive as stored
    pub email: String,
    /// Absent for accounts created through an external identity provider
    pub password: Option<UserPassword>,
    /// Avatar URI
    pub avatar: Option<String>,
    pub preferences: Option<Preferences>,
    pub google: Option<ProviderLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a local account
    pub fn new(name: String, email: String, password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password: Some(password),
            avatar: None,
            preferences: None,
            google: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an account from an external identity (no local password)
    pub fn from_provider(
        name: String,
        email: String,
        avatar: Option<String>,
        link: ProviderLink,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password: None,
            avatar,
            preferences: None,
            google: Some(link),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge preference fields into the stored preferences
    pub fn merge_preferences(&mut self, patch: Preferences) {
        self.preferences.get_or_insert_with(Preferences::default).merge(patch);
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = Some(password);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::preferences::Theme;
    use crate::domain::value_object::user_password::RawPassword;

    #[test]
    fn test_provider_user_has_no_password() {
        let user = User::from_provider(
            "Ann".into(),
            "ann@x.com".into(),
            None,
            ProviderLink {
                subject: "sub".into(),
                access_token: "token".into(),
                refresh_token: None,
            },
        );
        assert!(user.password.is_none());
        assert!(user.google.is_some());
    }

    #[test]
    fn test_merge_preferences_from_empty() {
        let raw = RawPassword::new("pass1234".to_string()).unwrap();
        let user_password = UserPassword::from_raw(&raw, None).unwrap();
        let mut user = User::new("Ann".into(), "ann@x.com".into(), user_password);

        user.merge_preferences(Preferences {
            theme: Some(Theme::Dark),
            ..Default::default()
        });

        assert_eq!(
            user.preferences.and_then(|p| p.theme),
            Some(Theme::Dark)
        );
    }
}
