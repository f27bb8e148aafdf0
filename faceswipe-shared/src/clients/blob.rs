use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::errors::AppResult;

/// External blob storage contract. Only the avatar-upload flow uses it.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a file and return its public URL.
    async fn put(&self, path: &str, body: Vec<u8>, content_type: &str) -> AppResult<String>;
}

/// In-memory blob store for tests and local development.
pub struct MemoryBlobStore {
    public_url: String,
    objects: RwLock<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryBlobStore {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().unwrap().get(path).map(|(body, _)| body.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("memory://faceswipe")
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, body: Vec<u8>, content_type: &str) -> AppResult<String> {
        self.objects
            .write()
            .unwrap()
            .insert(path.to_string(), (body, content_type.to_string()));

        Ok(format!("{}/{}", self.public_url, path))
    }
}
