//! Value Object Module

pub mod preferences;
pub mod provider_link;
pub mod user_password;
