//! Supabase storage publisher.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::Path;
use tracing::info;

use crate::error::{StorageError, StorageResult};
use crate::publisher::{PublishOutcome, Publisher};

/// Default public bucket for composed videos.
pub const DEFAULT_BUCKET: &str = "promocast-videos";

/// Publisher targeting a Supabase storage bucket.
///
/// The actual byte push is performed by a downstream workflow step; this
/// publisher prepares the payload (base64 content plus the public object
/// URL the file will resolve to once uploaded).
#[derive(Debug, Clone)]
pub struct SupabasePublisher {
    base_url: String,
    bucket: String,
}

impl SupabasePublisher {
    pub fn new(base_url: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bucket: bucket.into(),
        }
    }

    /// Create a publisher from `SUPABASE_URL` and `SUPABASE_BUCKET`.
    pub fn from_env() -> StorageResult<Self> {
        let base_url = std::env::var("SUPABASE_URL")
            .map_err(|_| StorageError::config("SUPABASE_URL not set"))?;
        let bucket =
            std::env::var("SUPABASE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());
        Ok(Self::new(base_url, bucket))
    }

    /// Public object URL for a filename in the configured bucket.
    pub fn object_url(&self, filename: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            filename
        )
    }
}

#[async_trait]
impl Publisher for SupabasePublisher {
    async fn publish(&self, path: &Path) -> StorageResult<PublishOutcome> {
        if !path.exists() {
            return Err(StorageError::FileNotFound(path.to_path_buf()));
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StorageError::InvalidFilename(path.to_path_buf()))?
            .to_string();

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::read_failed(format!("{}: {e}", path.display())))?;
        let file_size = data.len() as u64;

        let video_url = self.object_url(&filename);
        info!(
            "Prepared upload for {} ({} bytes) -> {}",
            filename, file_size, video_url
        );

        Ok(PublishOutcome {
            video_url: Some(video_url),
            video_data: Some(BASE64.encode(data)),
            upload_ready: true,
            file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        let publisher = SupabasePublisher::new("https://abc.supabase.co/", "promo");
        assert_eq!(
            publisher.object_url("out.mp4"),
            "https://abc.supabase.co/storage/v1/object/public/promo/out.mp4"
        );
    }

    #[tokio::test]
    async fn test_publish_reads_and_encodes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, b"mp4bytes").await.unwrap();

        let publisher = SupabasePublisher::new("https://abc.supabase.co", "promo");
        let outcome = publisher.publish(&path).await.unwrap();

        assert!(outcome.upload_ready);
        assert_eq!(outcome.file_size, 8);
        assert_eq!(outcome.video_data.as_deref(), Some("bXA0Ynl0ZXM="));
        assert_eq!(
            outcome.video_url.as_deref(),
            Some("https://abc.supabase.co/storage/v1/object/public/promo/clip.mp4")
        );
    }

    #[tokio::test]
    async fn test_publish_missing_file() {
        let publisher = SupabasePublisher::new("https://abc.supabase.co", "promo");
        let err = publisher.publish(Path::new("/nonexistent/clip.mp4")).await.unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(_)));
    }
}
