//! S3 blob provider.
//!
//! Objects are keyed by the path hint and served from `public_base_url`
//! (a bucket website endpoint or CDN distribution in front of the bucket).

use aws_sdk_s3::primitives::ByteStream;

use crate::{BlobStore, StorageError};

pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    /// Build a client from the ambient AWS environment (credentials chain,
    /// region, endpoint overrides).
    pub async fn connect(bucket: String, public_base_url: String) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn key_for_url<'a>(&self, url: &'a str) -> Result<&'a str, StorageError> {
        url.strip_prefix(&self.public_base_url)
            .map(|k| k.trim_start_matches('/'))
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StorageError::ForeignUrl(url.to_string()))
    }
}

#[async_trait::async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, bytes: Vec<u8>, path_hint: &str) -> Result<String, StorageError> {
        let key = path_hint.trim_start_matches('/');
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let key = self.key_for_url(url)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(())
    }
}
