use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode};

/// External identity provider contract.
///
/// Creating an account also signs the new identity in, matching the hosted
/// provider this client targets.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> AppResult<Uuid>;

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Uuid>;

    async fn sign_out(&self) -> AppResult<()>;

    async fn current_identity(&self) -> Option<Uuid>;

    async fn send_password_reset(&self, email: &str) -> AppResult<()>;
}

struct Credential {
    uid: Uuid,
    password_hash: String,
}

/// In-memory identity backend for tests and local development.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Credential>>,
    current: RwLock<Option<Uuid>>,
    reset_requests: Mutex<Vec<String>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails a password reset was requested for, oldest first.
    pub fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> AppResult<Uuid> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(email) {
            return Err(AppError::new(
                ErrorCode::EmailAlreadyExists,
                "an account with this email already exists",
            ));
        }

        let uid = Uuid::new_v4();
        let password_hash = hash_password(password)?;
        accounts.insert(email.to_string(), Credential { uid, password_hash });
        drop(accounts);

        *self.current.write().unwrap() = Some(uid);
        tracing::info!(uid = %uid, "account created");
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Uuid> {
        let accounts = self.accounts.read().unwrap();
        let credential = accounts
            .get(email)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials, "invalid email or password"))?;

        if !verify_password(password, &credential.password_hash)? {
            return Err(AppError::new(
                ErrorCode::InvalidCredentials,
                "invalid email or password",
            ));
        }

        let uid = credential.uid;
        drop(accounts);

        *self.current.write().unwrap() = Some(uid);
        Ok(uid)
    }

    async fn sign_out(&self) -> AppResult<()> {
        *self.current.write().unwrap() = None;
        Ok(())
    }

    async fn current_identity(&self) -> Option<Uuid> {
        *self.current.read().unwrap()
    }

    async fn send_password_reset(&self, email: &str) -> AppResult<()> {
        if !self.accounts.read().unwrap().contains_key(email) {
            return Err(AppError::new(
                ErrorCode::AccountNotFound,
                "no account with this email",
            ));
        }
        self.reset_requests.lock().unwrap().push(email.to_string());
        tracing::info!(email = %email, "password reset requested");
        Ok(())
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_account_signs_in() {
        let identity = MemoryIdentityProvider::new();
        let uid = identity.create_account("ana@example.com", "hunter42x").await.unwrap();
        assert_eq!(identity.current_identity().await, Some(uid));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let identity = MemoryIdentityProvider::new();
        identity.create_account("ana@example.com", "hunter42x").await.unwrap();

        let err = identity
            .create_account("ana@example.com", "other9pass")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmailAlreadyExists);
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let identity = MemoryIdentityProvider::new();
        identity.create_account("ana@example.com", "hunter42x").await.unwrap();
        identity.sign_out().await.unwrap();

        let err = identity.sign_in("ana@example.com", "not-it-1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCredentials);
        assert_eq!(identity.current_identity().await, None);
    }

    #[tokio::test]
    async fn sign_in_round_trip() {
        let identity = MemoryIdentityProvider::new();
        let uid = identity.create_account("ana@example.com", "hunter42x").await.unwrap();
        identity.sign_out().await.unwrap();

        let signed_in = identity.sign_in("ana@example.com", "hunter42x").await.unwrap();
        assert_eq!(signed_in, uid);
        assert_eq!(identity.current_identity().await, Some(uid));
    }

    #[tokio::test]
    async fn password_reset_requires_known_email() {
        let identity = MemoryIdentityProvider::new();
        identity.create_account("ana@example.com", "hunter42x").await.unwrap();

        identity.send_password_reset("ana@example.com").await.unwrap();
        assert_eq!(identity.reset_requests(), vec!["ana@example.com".to_string()]);

        let err = identity.send_password_reset("ghost@example.com").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AccountNotFound);
    }
}
