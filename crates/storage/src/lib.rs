//! Photo object storage.
//!
//! Recipe photos live outside the database, addressed by a path namespaced as
//! `{family}/{recipe}/{timestamp}.{ext}` and served from a public base URL.
//! [`PhotoStore`] abstracts the backend: S3 in production, a local directory
//! for development. Selection happens via [`photo_store_from_env`].

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

/// Error type for photo storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// S3 request failure (upload, delete).
    #[error("S3 error: {0}")]
    S3(String),

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Object path for one recipe photo.
///
/// The timestamp keeps re-uploads from colliding while leaving old objects
/// addressable until replaced.
pub fn photo_object_path(family_id: i64, recipe_id: i64, timestamp_millis: i64, ext: &str) -> String {
    format!("{family_id}/{recipe_id}/{timestamp_millis}.{ext}")
}

/// Storage backend for recipe photos.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Upload bytes under `path`, returning the public URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Remove a previously uploaded object. Missing objects are not an error.
    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// S3 provider
// ---------------------------------------------------------------------------

/// S3-backed photo store.
pub struct S3PhotoStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3PhotoStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self { client, bucket, public_base_url }
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(aws_sdk_s3::primitives::ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, path, "Photo uploaded to S3");
        Ok(public_url(&self.public_base_url, path))
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Local filesystem provider
// ---------------------------------------------------------------------------

/// Local-directory photo store for development.
pub struct LocalPhotoStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalPhotoStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: String) -> Self {
        Self { root: root.into(), public_base_url }
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!(path = %target.display(), "Photo written locally");
        Ok(public_url(&self.public_base_url, path))
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn public_url(base: &str, path: &str) -> String {
    format!("{}/{path}", base.trim_end_matches('/'))
}

// ---------------------------------------------------------------------------
// Environment-based selection
// ---------------------------------------------------------------------------

/// Build a photo store from environment variables.
///
/// | Variable                 | Effect                                        |
/// |--------------------------|-----------------------------------------------|
/// | `PHOTOS_S3_BUCKET`       | if set, use S3 with this bucket               |
/// | `PHOTOS_PUBLIC_BASE_URL` | public URL prefix (default depends on backend)|
/// | `PHOTOS_LOCAL_DIR`       | local directory (default `storage/photos`)    |
pub async fn photo_store_from_env() -> Arc<dyn PhotoStore> {
    if let Ok(bucket) = std::env::var("PHOTOS_S3_BUCKET") {
        let base_url = std::env::var("PHOTOS_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.amazonaws.com"));
        let config = aws_config::load_from_env().await;
        let client = aws_sdk_s3::Client::new(&config);
        tracing::info!(bucket = %bucket, "Using S3 photo storage");
        return Arc::new(S3PhotoStore::new(client, bucket, base_url));
    }

    let dir = std::env::var("PHOTOS_LOCAL_DIR").unwrap_or_else(|_| "storage/photos".to_string());
    let base_url = std::env::var("PHOTOS_PUBLIC_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000/photos".to_string());
    tracing::info!(dir = %dir, "Using local photo storage");
    Arc::new(LocalPhotoStore::new(dir, base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_paths_are_namespaced() {
        assert_eq!(photo_object_path(7, 42, 1700000000000, "jpg"), "7/42/1700000000000.jpg");
    }

    #[test]
    fn public_url_joins_without_double_slash() {
        assert_eq!(
            public_url("https://photos.test/", "7/42/1.jpg"),
            "https://photos.test/7/42/1.jpg"
        );
        assert_eq!(
            public_url("https://photos.test", "7/42/1.jpg"),
            "https://photos.test/7/42/1.jpg"
        );
    }

    #[tokio::test]
    async fn local_store_round_trip() {
        let root = std::env::temp_dir().join(format!("recetario-photos-{}", std::process::id()));
        let store = LocalPhotoStore::new(&root, "http://localhost:3000/photos".to_string());

        let url = store
            .upload("1/2/3.jpg", b"not really a jpeg".to_vec(), "image/jpeg")
            .await
            .expect("upload should succeed");
        assert_eq!(url, "http://localhost:3000/photos/1/2/3.jpg");
        assert!(root.join("1/2/3.jpg").exists());

        store.remove("1/2/3.jpg").await.expect("remove should succeed");
        assert!(!root.join("1/2/3.jpg").exists());
        // Removing again is not an error.
        store.remove("1/2/3.jpg").await.expect("double remove should be a no-op");

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
