//! Platform Crate - Credential Codec
//!
//! Technical foundations shared by the feature crates:
//! - Password hashing (Argon2id, NFKC normalized, zeroized)
//! - Signed, time-limited identity tokens (HS256)
//! - Bearer-token middleware resolving the request [`bearer::Caller`]

pub mod bearer;
pub mod password;
pub mod token;
