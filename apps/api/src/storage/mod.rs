//! Object storage for original résumé uploads.

pub mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

pub use s3::S3FileStore;

/// An object read back from storage.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError>;
    /// `Ok(None)` when no object exists under `key`.
    async fn get(&self, key: &str) -> Result<Option<StoredFile>, AppError>;
    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}
