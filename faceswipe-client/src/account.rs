use std::sync::Arc;

use uuid::Uuid;

use faceswipe_shared::clients::{IdentityProvider, ProfileStore};
use faceswipe_shared::errors::{AppError, AppResult, ErrorCode};
use faceswipe_shared::types::{Gender, NewProfile, UserProfile};

#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub username: String,
    pub gender: Gender,
    pub email: String,
    pub password: String,
}

/// Account flows: thin delegation to the identity provider, plus the
/// initial profile document written right after registration.
pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl AccountService {
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { identity, profiles }
    }

    /// Create the account and its initial profile document. The photo stays
    /// empty until the user uploads one, which also keeps the new profile
    /// out of everyone's feed until then.
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<UserProfile> {
        let username = request.username.trim();
        let email = request.email.trim();
        if username.is_empty() || email.is_empty() {
            return Err(AppError::Validation("please fill all fields".into()));
        }
        validate_password(&request.password)?;

        let uid = self.identity.create_account(email, &request.password).await?;

        let profile = self
            .profiles
            .set(
                uid,
                NewProfile {
                    username: username.to_string(),
                    gender: request.gender,
                    description: String::new(),
                    photo_url: String::new(),
                },
            )
            .await?;

        tracing::info!(uid = %uid, username = %profile.username, "signed up");
        Ok(profile)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Uuid> {
        let uid = self.identity.sign_in(email.trim(), password).await?;
        tracing::info!(uid = %uid, "signed in");
        Ok(uid)
    }

    pub async fn sign_out(&self) -> AppResult<()> {
        self.identity.sign_out().await
    }

    pub async fn current(&self) -> Option<Uuid> {
        self.identity.current_identity().await
    }

    pub async fn send_password_reset(&self, email: &str) -> AppResult<()> {
        self.identity.send_password_reset(email.trim()).await
    }
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            "password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            "password must contain at least one number",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::new(
            ErrorCode::PasswordTooWeak,
            "password must contain at least one letter",
        ));
    }
    Ok(())
}
