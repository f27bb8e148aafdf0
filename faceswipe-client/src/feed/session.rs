use std::sync::Arc;

use uuid::Uuid;

use faceswipe_shared::clients::{LikeStore, ProfileStore};
use faceswipe_shared::errors::{AppError, AppResult, ErrorCode};
use faceswipe_shared::types::{like_key, Gender, NewLike, UserProfile};

use super::filter;

/// Result of a `like` swipe. `AlreadyLiked` is informational, not a failure:
/// the pair was liked before, nothing was written, the cursor stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    AlreadyLiked,
}

/// One viewer's swipe deck for one login. Created by
/// [`FeedService::initialize`], discarded on logout/reload; candidates are
/// fixed at load time and never refreshed mid-session.
#[derive(Debug)]
pub struct FeedSession {
    viewer_id: Uuid,
    viewer_gender: Gender,
    candidates: Vec<UserProfile>,
    cursor: usize,
    in_flight: bool,
}

impl FeedSession {
    pub fn viewer_id(&self) -> Uuid {
        self.viewer_id
    }

    pub fn viewer_gender(&self) -> Gender {
        self.viewer_gender
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    /// The card currently on top, `None` once the feed is exhausted.
    pub fn current_card(&self) -> Option<&UserProfile> {
        self.candidates.get(self.cursor)
    }

    /// The next `depth` cards for the stacked rendering, clipped to what is
    /// left. Read-only: never advances the cursor.
    pub fn visible_stack(&self, depth: usize) -> &[UserProfile] {
        let start = self.cursor.min(self.candidates.len());
        let end = self.cursor.saturating_add(depth).min(self.candidates.len());
        &self.candidates[start..end]
    }

    /// Pass on the current card. No store writes.
    pub fn skip(&mut self) -> AppResult<()> {
        if self.in_flight {
            return Err(AppError::new(
                ErrorCode::ActionInFlight,
                "another swipe is still in flight",
            ));
        }
        if self.is_exhausted() {
            return Err(AppError::new(ErrorCode::FeedExhausted, "no more profiles"));
        }
        self.cursor += 1;
        Ok(())
    }
}

/// Store-backed feed operations: building a session and recording likes.
pub struct FeedService {
    profiles: Arc<dyn ProfileStore>,
    likes: Arc<dyn LikeStore>,
}

impl FeedService {
    pub fn new(profiles: Arc<dyn ProfileStore>, likes: Arc<dyn LikeStore>) -> Self {
        Self { profiles, likes }
    }

    /// Build a fresh deck for `viewer_id`.
    ///
    /// Fails with `ProfileNotFound` if the viewer has no profile document;
    /// recovery (placeholder creation) is the profile service's job.
    pub async fn initialize(&self, viewer_id: Uuid) -> AppResult<FeedSession> {
        let viewer = self
            .profiles
            .get(viewer_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound, "viewer profile not found"))?;

        let mut candidates: Vec<UserProfile> = self
            .profiles
            .get_all()
            .await?
            .into_iter()
            .filter(|candidate| filter::is_visible_to(viewer_id, viewer.gender, candidate))
            .collect();
        filter::shuffle(&mut candidates);

        tracing::debug!(
            viewer_id = %viewer_id,
            candidates = candidates.len(),
            "feed session initialized"
        );

        Ok(FeedSession {
            viewer_id,
            viewer_gender: viewer.gender,
            candidates,
            cursor: 0,
            in_flight: false,
        })
    }

    /// Like the current card.
    ///
    /// The deterministic key is checked first; an existing record yields
    /// `AlreadyLiked` and leaves the cursor where it is. A fresh like is
    /// written with the viewer's username denormalized into it, and the
    /// cursor advances optimistically. The in-flight flag rejects a second
    /// swipe while the store round trip is pending, so rapid repeated input
    /// cannot double-advance.
    pub async fn like(
        &self,
        session: &mut FeedSession,
        viewer: &UserProfile,
    ) -> AppResult<LikeOutcome> {
        if session.in_flight {
            return Err(AppError::new(
                ErrorCode::ActionInFlight,
                "another swipe is still in flight",
            ));
        }
        if viewer.id != session.viewer_id {
            return Err(AppError::Validation(
                "viewer does not own this feed session".into(),
            ));
        }
        let Some(target) = session.current_card().cloned() else {
            return Err(AppError::new(ErrorCode::FeedExhausted, "no more profiles"));
        };

        session.in_flight = true;
        let outcome = self.record_like(&target, viewer).await;
        session.in_flight = false;

        match outcome? {
            LikeOutcome::Liked => {
                session.cursor += 1;
                Ok(LikeOutcome::Liked)
            }
            LikeOutcome::AlreadyLiked => Ok(LikeOutcome::AlreadyLiked),
        }
    }

    async fn record_like(&self, target: &UserProfile, viewer: &UserProfile) -> AppResult<LikeOutcome> {
        let key = like_key(target.id, viewer.id);
        if self.likes.get(&key).await?.is_some() {
            tracing::debug!(key = %key, "duplicate like suppressed");
            return Ok(LikeOutcome::AlreadyLiked);
        }

        self.likes
            .create(NewLike {
                liked_id: target.id,
                liked_by: viewer.id,
                liked_by_name: viewer.username.clone(),
            })
            .await?;

        tracing::info!(liked_id = %target.id, liked_by = %viewer.id, "like recorded");
        Ok(LikeOutcome::Liked)
    }
}
