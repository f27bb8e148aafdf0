//! FaceSwipe client SDK.
//!
//! Account, profile, feed, and notification workflows for the FaceSwipe
//! swipe-matching app. Persistence, authentication, file storage, and
//! realtime sync are delegated to an external backend through the contracts
//! in [`faceswipe_shared::clients`]; in-memory backends ship for tests and
//! local development.

use std::sync::Arc;

pub mod account;
pub mod config;
pub mod feed;
pub mod notifications;
pub mod profile;

pub use account::{AccountService, SignUpRequest};
pub use config::AppConfig;
pub use feed::{FeedService, FeedSession, LikeOutcome};
pub use notifications::{LikeNotifications, NotificationListener};
pub use profile::ProfileService;

use faceswipe_shared::clients::{
    BlobStore, IdentityProvider, LikeStore, MemoryBlobStore, MemoryIdentityProvider,
    MemoryLikeStore, MemoryProfileStore, ProfileStore,
};
use faceswipe_shared::errors::AppResult;

/// The wired-up client: one instance per app session.
pub struct FaceSwipe {
    pub config: AppConfig,
    pub accounts: AccountService,
    pub profiles: ProfileService,
    pub feed: FeedService,
    pub notifications: NotificationListener,
}

impl FaceSwipe {
    pub fn new(
        config: AppConfig,
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        likes: Arc<dyn LikeStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let accounts = AccountService::new(identity, profiles.clone());
        let profile_service = ProfileService::new(
            profiles.clone(),
            likes.clone(),
            blobs,
            config.avatar_prefix.clone(),
            config.recent_likes_limit,
        );
        let feed = FeedService::new(profiles, likes.clone());
        let notifications = NotificationListener::new(likes, config.notification_limit);

        Self {
            config,
            accounts,
            profiles: profile_service,
            feed,
            notifications,
        }
    }

    /// A fully in-memory instance for tests and local development.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryIdentityProvider::new()),
            Arc::new(MemoryProfileStore::new()),
            Arc::new(MemoryLikeStore::new()),
            Arc::new(MemoryBlobStore::default()),
        )
    }

    /// Sign out and drop the notification subscription so the next login
    /// starts clean.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.notifications.detach();
        self.accounts.sign_out().await
    }
}
