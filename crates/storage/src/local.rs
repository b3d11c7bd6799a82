//! Local filesystem blob provider.

use std::path::PathBuf;

use crate::{BlobStore, StorageError};

/// Stores blobs under a root directory and maps them to URLs by prefixing
/// the relative path with `public_base_url`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Map a public URL back to the filesystem path it was stored at.
    fn path_for_url(&self, url: &str) -> Result<PathBuf, StorageError> {
        let rel = url
            .strip_prefix(&self.public_base_url)
            .map(|r| r.trim_start_matches('/'))
            .ok_or_else(|| StorageError::ForeignUrl(url.to_string()))?;
        // Reject traversal out of the root.
        if rel.split('/').any(|seg| seg == "..") {
            return Err(StorageError::ForeignUrl(url.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, bytes: Vec<u8>, path_hint: &str) -> Result<String, StorageError> {
        let rel = path_hint.trim_start_matches('/');
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(format!("{}/{rel}", self.public_base_url))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let path = self.path_for_url(url)?;
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}
