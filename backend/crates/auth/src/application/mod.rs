//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod external_sign_in;
pub mod profile;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::{AuthConfig, GoogleConfig};
pub use external_sign_in::{ExternalSignInOutput, ExternalSignInUseCase};
pub use profile::{
    DeleteProfileUseCase, GetProfileUseCase, PreferencesInput, UpdateProfileInput,
    UpdateProfileUseCase,
};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
