use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::types::{NewProfile, UpdateProfile, UserProfile};

/// External profile document store contract.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Full create/replace. The store assigns `created_at`/`updated_at`.
    async fn set(&self, id: Uuid, profile: NewProfile) -> AppResult<UserProfile>;

    /// Merge update: `None` fields are left unchanged.
    async fn update(&self, id: Uuid, changes: UpdateProfile) -> AppResult<UserProfile>;

    /// The backing query model has no efficient inequality filters, so feed
    /// candidates are fetched in full and filtered client-side. Acceptable
    /// while the candidate set stays small.
    async fn get_all(&self) -> AppResult<Vec<UserProfile>>;
}

/// In-memory profile store for tests and local development.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().unwrap().get(&id).cloned())
    }

    async fn set(&self, id: Uuid, profile: NewProfile) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().unwrap();
        let now = Utc::now();
        let created_at = profiles.get(&id).map(|p| p.created_at).unwrap_or(now);

        let stored = UserProfile {
            id,
            username: profile.username,
            gender: profile.gender,
            description: profile.description,
            photo_url: profile.photo_url,
            created_at,
            updated_at: now,
        };
        profiles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: Uuid, changes: UpdateProfile) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().unwrap();
        let profile = profiles
            .get_mut(&id)
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "profile not found"))?;

        if let Some(username) = changes.username {
            profile.username = username;
        }
        if let Some(gender) = changes.gender {
            profile.gender = gender;
        }
        if let Some(description) = changes.description {
            profile.description = description;
        }
        if let Some(photo_url) = changes.photo_url {
            profile.photo_url = photo_url;
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    async fn get_all(&self) -> AppResult<Vec<UserProfile>> {
        Ok(self.profiles.read().unwrap().values().cloned().collect())
    }
}
