use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub gender: Gender,
    /// Empty string when the user has not written one.
    pub description: String,
    /// Empty string until an avatar has been uploaded.
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn has_photo(&self) -> bool {
        !self.photo_url.is_empty()
    }
}

/// Full create/replace payload. Timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub username: String,
    pub gender: Gender,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo_url: String,
}

/// Merge payload: `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
}
