//! Blob storage for uploaded images.
//!
//! [`BlobStore`] is the narrow contract the API layer consumes: `put` bytes
//! under a path hint and get back a public URL, `delete` by that URL. Two
//! providers exist: local filesystem (default, suitable for single-host
//! deployments where the web server fronts the upload directory) and S3.
//!
//! Callers treat deletes as best-effort; a provider returns an error and the
//! caller decides whether it is fatal (it never is for the in-scope flows).

use std::sync::Arc;

pub mod local;
pub mod s3;

pub use local::LocalBlobStore;
pub use s3::S3BlobStore;

/// Errors raised by blob store providers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("URL {0} does not belong to this store")]
    ForeignUrl(String),

    #[error("Invalid storage configuration: {0}")]
    Config(String),
}

/// Narrow blob-store contract: URL-returning put, URL-addressed delete.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `path_hint` (e.g. `projects/42/1693400000_site.jpg`)
    /// and return the public URL the stored object is served from.
    async fn put(&self, bytes: Vec<u8>, path_hint: &str) -> Result<String, StorageError>;

    /// Delete the object a previous `put` returned `url` for.
    async fn delete(&self, url: &str) -> Result<(), StorageError>;
}

/// Storage backend selection, loaded from environment variables.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local {
        /// Directory blobs are written under.
        root: std::path::PathBuf,
        /// URL prefix the directory is served from.
        public_base_url: String,
    },
    S3 {
        bucket: String,
        /// URL prefix objects are served from (bucket website or CDN).
        public_base_url: String,
    },
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                   | Default                       |
    /// |---------------------------|-------------------------------|
    /// | `STORAGE_BACKEND`         | `local`                       |
    /// | `STORAGE_LOCAL_ROOT`      | `./uploads`                   |
    /// | `STORAGE_PUBLIC_BASE_URL` | `http://localhost:3000/uploads` |
    /// | `STORAGE_S3_BUCKET`       | -- (required for `s3`)        |
    pub fn from_env() -> Result<Self, StorageError> {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/uploads".into());

        match backend.as_str() {
            "local" => {
                let root = std::env::var("STORAGE_LOCAL_ROOT").unwrap_or_else(|_| "./uploads".into());
                Ok(StorageConfig::Local {
                    root: root.into(),
                    public_base_url,
                })
            }
            "s3" => {
                let bucket = std::env::var("STORAGE_S3_BUCKET").map_err(|_| {
                    StorageError::Config("STORAGE_S3_BUCKET must be set for the s3 backend".into())
                })?;
                Ok(StorageConfig::S3 {
                    bucket,
                    public_base_url,
                })
            }
            other => Err(StorageError::Config(format!(
                "Unknown STORAGE_BACKEND: {other}. Must be 'local' or 's3'"
            ))),
        }
    }
}

/// Construct the configured provider.
pub async fn connect(config: StorageConfig) -> Result<Arc<dyn BlobStore>, StorageError> {
    match config {
        StorageConfig::Local {
            root,
            public_base_url,
        } => Ok(Arc::new(LocalBlobStore::new(root, public_base_url))),
        StorageConfig::S3 {
            bucket,
            public_base_url,
        } => Ok(Arc::new(S3BlobStore::connect(bucket, public_base_url).await)),
    }
}
