//! User password value objects
//!
//! [`RawPassword`] is what a request carried; [`UserPassword`] is what the
//! users table stores. Mapping codec failures onto [`AuthError`] happens here.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("pass1234".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(stored.verify(&raw, None));
//! ```

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AuthError::PasswordPolicy(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        HashedPassword::new(&raw.0, pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// A stored value that does not parse is corruption, not user error
    pub fn from_phc_string(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::parse(phc)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_str()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.matches(&raw.0, pepper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_failures_map_to_password_policy() {
        assert!(RawPassword::new("pass1234".to_string()).is_ok());
        for bad in ["abc", "    "] {
            assert!(matches!(
                RawPassword::new(bad.to_string()),
                Err(AuthError::PasswordPolicy(_))
            ));
        }
    }

    #[test]
    fn test_verify_with_pepper() {
        let raw = RawPassword::new("pass1234".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        let restored = UserPassword::from_phc_string(stored.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, Some(b"pepper")));

        let wrong = RawPassword::new("pass12345".to_string()).unwrap();
        assert!(!restored.verify(&wrong, Some(b"pepper")));
    }

    #[test]
    fn test_corrupt_hash_is_internal_error() {
        assert!(matches!(
            UserPassword::from_phc_string("plaintext"),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword".to_string()).unwrap();
        assert!(!format!("{raw:?}").contains("Secret"));

        let stored = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{stored:?}").contains("argon2"));
    }
}
