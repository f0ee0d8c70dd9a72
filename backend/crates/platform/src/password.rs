//! Password hashing
//!
//! Argon2id over the NFKC-normalized password, with an optional
//! application-wide pepper appended. The stored form is the PHC string, which
//! carries its own salt and parameters.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

/// In Unicode code points, after normalization
pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password must be between 4 and 128 characters")]
    Length,

    #[error("Password cannot be blank")]
    Blank,

    #[error("Password contains control characters")]
    ControlCharacter,

    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// A submitted password. Wiped from memory on drop, never printed.
pub struct ClearTextPassword(Zeroizing<String>);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordError> {
        let raw = Zeroizing::new(raw);
        let normalized = Zeroizing::new(raw.nfkc().collect::<String>());

        if normalized.trim().is_empty() {
            return Err(PasswordError::Blank);
        }
        let length = normalized.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(PasswordError::Length);
        }
        if normalized
            .chars()
            .any(|ch| ch.is_control() && !matches!(ch, '\t' | '\n'))
        {
            return Err(PasswordError::ControlCharacter);
        }

        Ok(Self(normalized))
    }

    fn with_pepper(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut input = Zeroizing::new(self.0.as_bytes().to_vec());
        input.extend_from_slice(pepper.unwrap_or_default());
        input
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Argon2id PHC string, safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash with a fresh random salt
    pub fn new(password: &ClearTextPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(OsRng);
        let phc = Argon2::default()
            .hash_password(&password.with_pepper(pepper), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;

        Ok(Self(phc.to_string()))
    }

    /// Restore a stored hash
    pub fn parse(phc: impl Into<String>) -> Result<Self, PasswordError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| PasswordError::MalformedHash)?;
        Ok(Self(phc))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The pepper must be the one the hash was made with
    pub fn matches(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(&password.with_pepper(pepper), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_policy() {
        assert!(ClearTextPassword::new("abcd".into()).is_ok());
        assert_eq!(
            ClearTextPassword::new("abc".into()).unwrap_err(),
            PasswordError::Length
        );
        assert_eq!(
            ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)).unwrap_err(),
            PasswordError::Length
        );
        assert_eq!(
            ClearTextPassword::new("      ".into()).unwrap_err(),
            PasswordError::Blank
        );
        assert_eq!(
            ClearTextPassword::new("pass\u{7}word".into()).unwrap_err(),
            PasswordError::ControlCharacter
        );
    }

    #[test]
    fn test_full_width_digits_verify_as_ascii() {
        let hashed = HashedPassword::new(&clear("pass１２３４"), None).unwrap();
        assert!(hashed.matches(&clear("pass1234"), None));
    }

    #[test]
    fn test_hash_is_salted_argon2id() {
        let password = clear("pass1234");
        let first = HashedPassword::new(&password, None).unwrap();
        let second = HashedPassword::new(&password, None).unwrap();

        assert!(first.as_str().starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(first.matches(&password, None));
        assert!(!first.matches(&clear("pass12345"), None));
    }

    #[test]
    fn test_pepper_must_match() {
        let password = clear("pass1234");
        let hashed = HashedPassword::new(&password, Some(b"pepper")).unwrap();

        assert!(hashed.matches(&password, Some(b"pepper")));
        assert!(!hashed.matches(&password, None));
        assert!(!hashed.matches(&password, Some(b"salt")));
    }

    #[test]
    fn test_parse_stored_hash() {
        let password = clear("pass1234");
        let stored = HashedPassword::new(&password, None).unwrap();

        let restored = HashedPassword::parse(stored.as_str()).unwrap();
        assert!(restored.matches(&password, None));
        assert_eq!(
            HashedPassword::parse("pass1234").unwrap_err(),
            PasswordError::MalformedHash
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = clear("hunter22");
        assert!(!format!("{password:?}").contains("hunter"));

        let hashed = HashedPassword::new(&password, None).unwrap();
        assert!(!format!("{hashed:?}").contains("argon2"));
    }
}
