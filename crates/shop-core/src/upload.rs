//! Blob-storage contract for product images.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;

/// Upload failure. Transient: retrying the submission is the recovery
/// path, and a failed upload must never leave a half-created product.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Storage could not be reached.
    #[error("blob storage unavailable: {0}")]
    Unavailable(String),

    /// Storage refused the object.
    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// External blob storage, consumed only while building a product's image
/// URL before insertion.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the bytes under `name` and return a fetchable URL.
    async fn upload(&self, bytes: &[u8], name: &str) -> Result<String, UploadError>;
}

/// A [`BlobStore`] backed by a process-local map, for development and
/// tests.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }

    /// Whether an object was stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.objects.lock().contains_key(name)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, bytes: &[u8], name: &str) -> Result<String, UploadError> {
        if name.is_empty() {
            return Err(UploadError::Rejected("object name is empty".to_string()));
        }
        self.objects.lock().insert(name.to_string(), bytes.to_vec());
        tracing::debug!(name, size = bytes.len(), "blob stored");
        Ok(format!("memory://product-images/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_url_and_stores_bytes() {
        let store = MemoryBlobStore::new();
        let url = store.upload(&[1, 2, 3], "mouse.png").await.unwrap();

        assert_eq!(url, "memory://product-images/mouse.png");
        assert!(store.contains("mouse.png"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let store = MemoryBlobStore::new();
        let err = store.upload(&[1], "").await.unwrap_err();
        assert!(matches!(err, UploadError::Rejected(_)));
        assert!(store.is_empty());
    }
}
