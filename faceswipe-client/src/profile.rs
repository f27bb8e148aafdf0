use std::sync::Arc;

use uuid::Uuid;

use faceswipe_shared::clients::{BlobStore, LikeStore, ProfileStore};
use faceswipe_shared::errors::{AppError, AppResult, ErrorCode};
use faceswipe_shared::types::{Gender, LikeRecord, NewProfile, UpdateProfile, UserProfile};

/// Profile page workflows: load-or-create, edits, avatar handling, and the
/// recent-likes list.
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    likes: Arc<dyn LikeStore>,
    blobs: Arc<dyn BlobStore>,
    avatar_prefix: String,
    recent_limit: usize,
}

impl ProfileService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        likes: Arc<dyn LikeStore>,
        blobs: Arc<dyn BlobStore>,
        avatar_prefix: impl Into<String>,
        recent_limit: usize,
    ) -> Self {
        Self {
            profiles,
            likes,
            blobs,
            avatar_prefix: avatar_prefix.into(),
            recent_limit,
        }
    }

    /// Get the profile, creating a placeholder if the document is missing
    /// (username from the email local part, gender `other`, no photo). This
    /// is the recovery path for `ProfileNotFound` at feed initialization.
    pub async fn ensure_profile(&self, uid: Uuid, email: &str) -> AppResult<UserProfile> {
        if let Some(profile) = self.profiles.get(uid).await? {
            return Ok(profile);
        }

        tracing::warn!(uid = %uid, "profile document missing, creating placeholder");
        let username = email.split('@').next().unwrap_or("user").to_string();
        self.profiles
            .set(
                uid,
                NewProfile {
                    username,
                    gender: Gender::Other,
                    description: String::new(),
                    photo_url: String::new(),
                },
            )
            .await
    }

    pub async fn save(
        &self,
        uid: Uuid,
        username: &str,
        gender: Gender,
        description: &str,
    ) -> AppResult<UserProfile> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username required".into()));
        }

        let updated = self
            .profiles
            .update(
                uid,
                UpdateProfile {
                    username: Some(username.to_string()),
                    gender: Some(gender),
                    description: Some(description.trim().to_string()),
                    photo_url: None,
                },
            )
            .await?;

        tracing::info!(uid = %uid, "profile saved");
        Ok(updated)
    }

    /// Upload a new avatar and merge its URL into the profile, which is
    /// what makes the profile visible in other users' feeds.
    pub async fn upload_avatar(
        &self,
        uid: Uuid,
        data: Vec<u8>,
        content_type: &str,
    ) -> AppResult<String> {
        let ext = match content_type {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => {
                return Err(AppError::new(
                    ErrorCode::PhotoUploadFailed,
                    "unsupported image format, accepted: jpeg, png, webp, gif",
                ));
            }
        };

        let file_id = Uuid::now_v7();
        let key = format!("{}/{}/{}.{}", self.avatar_prefix, uid, file_id, ext);

        let photo_url = self.blobs.put(&key, data, content_type).await?;

        self.profiles
            .update(
                uid,
                UpdateProfile {
                    photo_url: Some(photo_url.clone()),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(uid = %uid, photo_url = %photo_url, "profile photo uploaded");
        Ok(photo_url)
    }

    /// Clear the avatar; the profile drops out of other users' feeds.
    pub async fn remove_avatar(&self, uid: Uuid) -> AppResult<UserProfile> {
        self.profiles
            .update(
                uid,
                UpdateProfile {
                    photo_url: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
    }

    /// Most recent likes received, newest first.
    pub async fn recent_likes(&self, uid: Uuid) -> AppResult<Vec<LikeRecord>> {
        self.likes.recent_for(uid, self.recent_limit).await
    }
}
