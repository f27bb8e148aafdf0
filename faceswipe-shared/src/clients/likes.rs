use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::types::{LikeRecord, NewLike};

/// External like store contract.
///
/// Likes are append-only documents under a deterministic composite key, with
/// a realtime snapshot subscription per likee.
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<LikeRecord>>;

    /// Fails with [`ErrorCode::LikeAlreadyExists`] if the key is present;
    /// the original record is never overwritten.
    async fn create(&self, like: NewLike) -> AppResult<LikeRecord>;

    /// Likes received by `liked_id`, newest first, at most `limit`.
    async fn recent_for(&self, liked_id: Uuid, limit: usize) -> AppResult<Vec<LikeRecord>>;

    /// Realtime feed of [`recent_for`](Self::recent_for) snapshots: one is
    /// delivered immediately, then a fresh one after every matching write.
    async fn subscribe(&self, liked_id: Uuid, limit: usize) -> AppResult<LikeSubscription>;
}

/// Handle for an active like subscription.
///
/// `unsubscribe` is idempotent; dropping the handle cancels as well, so a
/// consumer can re-subscribe at any time.
pub struct LikeSubscription {
    rx: mpsc::UnboundedReceiver<Vec<LikeRecord>>,
}

impl LikeSubscription {
    pub fn new(rx: mpsc::UnboundedReceiver<Vec<LikeRecord>>) -> Self {
        Self { rx }
    }

    /// The next snapshot, or `None` once the subscription is cancelled and
    /// buffered snapshots are drained.
    pub async fn next_snapshot(&mut self) -> Option<Vec<LikeRecord>> {
        self.rx.recv().await
    }

    pub fn unsubscribe(&mut self) {
        self.rx.close();
    }
}

struct Watcher {
    liked_id: Uuid,
    limit: usize,
    tx: mpsc::UnboundedSender<Vec<LikeRecord>>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, LikeRecord>,
    /// Insertion order; keeps `recent_for` strictly monotonic even when two
    /// writes land on the same timestamp tick.
    order: Vec<String>,
    watchers: Vec<Watcher>,
}

impl Inner {
    fn snapshot_for(&self, liked_id: Uuid, limit: usize) -> Vec<LikeRecord> {
        self.order
            .iter()
            .rev()
            .filter_map(|key| self.records.get(key))
            .filter(|record| record.liked_id == liked_id)
            .take(limit)
            .cloned()
            .collect()
    }
}

/// In-memory like store for tests and local development.
#[derive(Default)]
pub struct MemoryLikeStore {
    inner: Mutex<Inner>,
}

impl MemoryLikeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored like records.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LikeStore for MemoryLikeStore {
    async fn get(&self, key: &str) -> AppResult<Option<LikeRecord>> {
        Ok(self.inner.lock().unwrap().records.get(key).cloned())
    }

    async fn create(&self, like: NewLike) -> AppResult<LikeRecord> {
        let mut inner = self.inner.lock().unwrap();
        let key = like.key();
        if inner.records.contains_key(&key) {
            return Err(AppError::new(
                ErrorCode::LikeAlreadyExists,
                "like already recorded for this pair",
            ));
        }

        let record = LikeRecord {
            id: key.clone(),
            liked_id: like.liked_id,
            liked_by: like.liked_by,
            liked_by_name: like.liked_by_name,
            timestamp: Utc::now(),
        };
        inner.records.insert(key.clone(), record.clone());
        inner.order.push(key);

        inner.watchers.retain(|w| !w.tx.is_closed());
        for watcher in &inner.watchers {
            if watcher.liked_id == record.liked_id {
                let snapshot = inner.snapshot_for(watcher.liked_id, watcher.limit);
                let _ = watcher.tx.send(snapshot);
            }
        }

        Ok(record)
    }

    async fn recent_for(&self, liked_id: Uuid, limit: usize) -> AppResult<Vec<LikeRecord>> {
        Ok(self.inner.lock().unwrap().snapshot_for(liked_id, limit))
    }

    async fn subscribe(&self, liked_id: Uuid, limit: usize) -> AppResult<LikeSubscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().unwrap();

        let _ = tx.send(inner.snapshot_for(liked_id, limit));
        inner.watchers.push(Watcher { liked_id, limit, tx });

        Ok(LikeSubscription::new(rx))
    }
}
