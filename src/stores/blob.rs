//! Defines the blob store trait for receipt files.

use async_trait::async_trait;

use super::StoreError;

/// Handles the storage of uploaded receipt files.
///
/// Implementations wrap a remote blob storage service. Uploads are addressed
/// by a path chosen by the caller; downloads and deletions go through the
/// download URL the service hands back, because that URL is what transaction
/// records carry.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `path`, overwriting any previous blob there.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// The URL from which the blob at `path` can be downloaded.
    async fn download_url(&self, path: &str) -> Result<String, StoreError>;

    /// Remove the blob behind a download URL previously returned by
    /// [BlobStore::download_url].
    async fn delete(&self, url: &str) -> Result<(), StoreError>;
}
