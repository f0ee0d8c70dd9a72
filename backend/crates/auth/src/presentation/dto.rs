//! API DTOs (Data Transfer Objects)
//!
//! Request bodies default missing fields to empty values so they surface as
//! field diagnostics rather than body-parsing errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{
    ChangePasswordInput, PreferencesInput, SignInInput, SignUpInput, UpdateProfileInput,
};
use crate::domain::entity::user::User;
use crate::domain::value_object::preferences::Preferences;

// ============================================================================
// User
// ============================================================================

/// Public user representation. Never carries the password hash or provider tokens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub preferences: Option<Preferences>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            preferences: user.preferences,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<SignUpRequest> for SignUpInput {
    fn from(req: SignUpRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub user: UserResponse,
    pub token: String,
}

// ============================================================================
// Sign In
// ============================================================================

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl From<SignInRequest> for SignInInput {
    fn from(req: SignInRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub preferences: Option<PreferencesRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferencesRequest {
    pub theme: Option<String>,
    pub language: Option<String>,
    pub notifications: Option<bool>,
    pub timezone: Option<String>,
    pub date_format: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfileInput {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            avatar: req.avatar,
            preferences: req.preferences.map(|p| PreferencesInput {
                theme: p.theme,
                language: p.language,
                notifications: p.notifications,
                timezone: p.timezone,
                date_format: p.date_format,
            }),
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl From<ChangePasswordRequest> for ChangePasswordInput {
    fn from(req: ChangePasswordRequest) -> Self {
        Self {
            current_password: req.current_password,
            new_password: req.new_password,
        }
    }
}

// ============================================================================
// Google
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
}
