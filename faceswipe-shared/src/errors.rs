use serde::{Deserialize, Serialize};

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/store errors
/// - E1xxx: Account errors
/// - E2xxx: Profile errors
/// - E3xxx: Feed errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    StoreError,

    // Account (E1xxx)
    InvalidCredentials,
    EmailAlreadyExists,
    PasswordTooWeak,
    AccountNotFound,
    NotSignedIn,

    // Profile (E2xxx)
    ProfileNotFound,
    PhotoUploadFailed,

    // Feed (E3xxx)
    FeedExhausted,
    ActionInFlight,
    LikeAlreadyExists,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::StoreError => "E0004",

            // Account
            Self::InvalidCredentials => "E1001",
            Self::EmailAlreadyExists => "E1002",
            Self::PasswordTooWeak => "E1003",
            Self::AccountNotFound => "E1004",
            Self::NotSignedIn => "E1005",

            // Profile
            Self::ProfileNotFound => "E2001",
            Self::PhotoUploadFailed => "E2002",

            // Feed
            Self::FeedExhausted => "E3001",
            Self::ActionInFlight => "E3002",
            Self::LikeAlreadyExists => "E3003",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known { code: ErrorCode, message: String },

    #[error("internal error")]
    Internal(#[from] anyhow::Error),

    #[error("store error: {0}")]
    Store(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// The taxonomy code for this error, regardless of variant.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Known { code, .. } => *code,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Store(_) => ErrorCode::StoreError,
            Self::Validation(_) => ErrorCode::ValidationError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
