//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use kernel::envelope::Envelope;
use kernel::extract::{Json as JsonBody, Query};
use platform::bearer::Caller;
use platform::token::TokenCodec;
use std::sync::Arc;

use crate::application::{
    AuthConfig, ChangePasswordUseCase, DeleteProfileUseCase, ExternalSignInUseCase, GetProfileUseCase,
    GoogleConfig, SignInUseCase, SignUpUseCase, UpdateProfileUseCase,
};
use crate::domain::identity::IdentityProvider;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, GoogleCallbackQuery, SignInRequest, SignInResponse, SignUpRequest,
    SignUpResponse, UpdateProfileRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /user
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case.execute(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(SignUpResponse {
            user: output.user.into(),
            token: output.token,
        })),
    ))
}

/// POST /userLogin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> AuthResult<Json<Envelope<SignInResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case.execute(req.into()).await?;

    Ok(Json(Envelope::new(SignInResponse {
        token: output.token,
        user: output.user.into(),
    })))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /user/profile
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<Json<Envelope<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = GetProfileUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(Envelope::new(user.into())))
}

/// PUT /user/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> AuthResult<Json<Envelope<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = UpdateProfileUseCase::new(state.repo.clone())
        .execute(&caller.user_id, req.into())
        .await?;

    Ok(Json(Envelope::new(user.into())))
}

/// DELETE /user/profile
pub async fn delete_profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    DeleteProfileUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(Envelope::message("Account deleted")))
}

/// PUT /user/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    ChangePasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&caller.user_id, req.into())
        .await?;

    Ok(Json(Envelope::message("Password changed")))
}

// ============================================================================
// Google
// ============================================================================

/// Shared state for the external identity handlers
pub struct GoogleAppState<R, P>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub provider: Arc<P>,
    pub tokens: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
    pub google: Arc<GoogleConfig>,
}

// Manual impl: the provider itself need not be `Clone`
impl<R, P> Clone for GoogleAppState<R, P>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            provider: self.provider.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
            google: self.google.clone(),
        }
    }
}

/// GET /api/auth/google
pub async fn google_redirect<R, P>(
    State(state): State<GoogleAppState<R, P>>,
) -> AuthResult<Redirect>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let url = state.provider.authorization_url()?;
    Ok(Redirect::to(&url))
}

/// GET /api/auth/google/callback
pub async fn google_callback<R, P>(
    State(state): State<GoogleAppState<R, P>>,
    Query(query): Query<GoogleCallbackQuery>,
) -> AuthResult<Redirect>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let code = query.code.ok_or(AuthError::MissingAuthorizationCode)?;

    let use_case = ExternalSignInUseCase::new(
        state.repo.clone(),
        state.provider.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(&code).await?;

    Ok(Redirect::to(&state.google.frontend_callback(&output.token)))
}
