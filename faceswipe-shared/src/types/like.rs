use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deterministic like document key: one like per (likee, liker) pair, ever.
pub fn like_key(liked_id: Uuid, liked_by: Uuid) -> String {
    format!("{liked_id}_{liked_by}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRecord {
    /// Composite key, see [`like_key`].
    pub id: String,
    pub liked_id: Uuid,
    pub liked_by: Uuid,
    /// Snapshot of the liker's username at like time. Not updated on rename.
    pub liked_by_name: String,
    /// Assigned by the store on write.
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLike {
    pub liked_id: Uuid,
    pub liked_by: Uuid,
    pub liked_by_name: String,
}

impl NewLike {
    pub fn key(&self) -> String {
        like_key(self.liked_id, self.liked_by)
    }
}
