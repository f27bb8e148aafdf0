use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use faceswipe_shared::clients::LikeStore;
use faceswipe_shared::errors::AppResult;
use faceswipe_shared::types::LikeRecord;

/// One liked-by entry for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeEntry {
    pub name: String,
    pub at: DateTime<Utc>,
}

/// Projection of the current liked-by snapshot.
///
/// There is no persisted "seen" watermark, so `badge_count` is the size of
/// the window, not a true unseen delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeNotifications {
    pub badge_count: usize,
    pub recent: Vec<LikeEntry>,
}

/// Pure snapshot-to-view-model projection.
pub fn project(snapshot: &[LikeRecord]) -> LikeNotifications {
    LikeNotifications {
        badge_count: snapshot.len(),
        recent: snapshot
            .iter()
            .map(|record| LikeEntry {
                name: record.liked_by_name.clone(),
                at: record.timestamp,
            })
            .collect(),
    }
}

struct Active {
    viewer_id: Uuid,
    task: JoinHandle<()>,
}

/// Realtime "who liked me" listener.
///
/// At most one subscription is active at a time: attaching for a new viewer
/// tears down the previous one first, so switching accounts never delivers
/// stale-user notifications. The listener only feeds the watch channel; it
/// never touches feed session state.
pub struct NotificationListener {
    likes: Arc<dyn LikeStore>,
    limit: usize,
    active: Mutex<Option<Active>>,
}

impl NotificationListener {
    pub fn new(likes: Arc<dyn LikeStore>, limit: usize) -> Self {
        Self {
            likes,
            limit,
            active: Mutex::new(None),
        }
    }

    /// Subscribe for `viewer_id` and return a receiver of projected
    /// notification states. The first state arrives as soon as the store
    /// delivers its initial snapshot.
    pub async fn attach(&self, viewer_id: Uuid) -> AppResult<watch::Receiver<LikeNotifications>> {
        self.detach();

        let mut subscription = self.likes.subscribe(viewer_id, self.limit).await?;
        let (tx, rx) = watch::channel(LikeNotifications::default());

        let task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.next_snapshot().await {
                tx.send_replace(project(&snapshot));
            }
        });

        *self.active.lock().unwrap() = Some(Active { viewer_id, task });
        tracing::debug!(viewer_id = %viewer_id, "notification listener attached");
        Ok(rx)
    }

    /// Tear down the active subscription, if any. Idempotent.
    pub fn detach(&self) {
        if let Some(active) = self.active.lock().unwrap().take() {
            active.task.abort();
            tracing::debug!(viewer_id = %active.viewer_id, "notification listener detached");
        }
    }

    pub fn attached_viewer(&self) -> Option<Uuid> {
        self.active.lock().unwrap().as_ref().map(|a| a.viewer_id)
    }
}

impl Drop for NotificationListener {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceswipe_shared::clients::MemoryLikeStore;
    use faceswipe_shared::types::NewLike;
    use std::time::Duration;
    use tokio::time::timeout;

    fn new_like(liked_id: Uuid, name: &str) -> NewLike {
        NewLike {
            liked_id,
            liked_by: Uuid::new_v4(),
            liked_by_name: name.into(),
        }
    }

    async fn changed(rx: &mut watch::Receiver<LikeNotifications>) -> LikeNotifications {
        timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("no notification update in time")
            .expect("notification channel closed");
        rx.borrow_and_update().clone()
    }

    #[test]
    fn projection_counts_and_orders_entries() {
        let liked = Uuid::new_v4();
        let snapshot = vec![
            LikeRecord {
                id: "k1".into(),
                liked_id: liked,
                liked_by: Uuid::new_v4(),
                liked_by_name: "newest".into(),
                timestamp: Utc::now(),
            },
            LikeRecord {
                id: "k2".into(),
                liked_id: liked,
                liked_by: Uuid::new_v4(),
                liked_by_name: "older".into(),
                timestamp: Utc::now(),
            },
        ];

        let view = project(&snapshot);
        assert_eq!(view.badge_count, 2);
        assert_eq!(view.recent[0].name, "newest");
        assert_eq!(view.recent[1].name, "older");
    }

    #[tokio::test]
    async fn attach_delivers_initial_then_live_updates() {
        let store = Arc::new(MemoryLikeStore::new());
        let listener = NotificationListener::new(store.clone(), 10);
        let viewer = Uuid::new_v4();

        let mut rx = listener.attach(viewer).await.unwrap();
        let initial = changed(&mut rx).await;
        assert_eq!(initial.badge_count, 0);

        store.create(new_like(viewer, "marco")).await.unwrap();
        let updated = changed(&mut rx).await;
        assert_eq!(updated.badge_count, 1);
        assert_eq!(updated.recent[0].name, "marco");
    }

    #[tokio::test]
    async fn attach_replaces_previous_identity() {
        let store = Arc::new(MemoryLikeStore::new());
        let listener = NotificationListener::new(store.clone(), 10);
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        let mut old_rx = listener.attach(first).await.unwrap();
        changed(&mut old_rx).await;

        let mut rx = listener.attach(second).await.unwrap();
        assert_eq!(listener.attached_viewer(), Some(second));
        changed(&mut rx).await;

        store.create(new_like(first, "stale")).await.unwrap();
        store.create(new_like(second, "fresh")).await.unwrap();

        let view = changed(&mut rx).await;
        assert_eq!(view.recent[0].name, "fresh");

        // the replaced listener's channel closes once its task unwinds
        let closed = timeout(Duration::from_secs(1), async {
            while old_rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok(), "stale channel should close after replacement");
    }

    #[tokio::test]
    async fn detach_is_idempotent_and_reattachable() {
        let store = Arc::new(MemoryLikeStore::new());
        let listener = NotificationListener::new(store.clone(), 10);
        let viewer = Uuid::new_v4();

        listener.attach(viewer).await.unwrap();
        listener.detach();
        listener.detach();
        assert_eq!(listener.attached_viewer(), None);

        store.create(new_like(viewer, "marco")).await.unwrap();
        let mut rx = listener.attach(viewer).await.unwrap();
        let view = changed(&mut rx).await;
        assert_eq!(view.badge_count, 1);
    }

    #[tokio::test]
    async fn window_is_limited_to_most_recent() {
        let store = Arc::new(MemoryLikeStore::new());
        let listener = NotificationListener::new(store.clone(), 3);
        let viewer = Uuid::new_v4();

        for i in 0..5 {
            store.create(new_like(viewer, &format!("liker{i}"))).await.unwrap();
        }

        let mut rx = listener.attach(viewer).await.unwrap();
        let view = changed(&mut rx).await;
        assert_eq!(view.badge_count, 3);
        assert_eq!(view.recent[0].name, "liker4");
    }
}
