//! Publish trait and outcome.

use async_trait::async_trait;
use std::path::Path;

use crate::error::StorageResult;

/// What the publish step handed back to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    /// Resolvable remote reference to the video, if one exists.
    pub video_url: Option<String>,
    /// Base64-encoded video content for a downstream upload workflow.
    pub video_data: Option<String>,
    /// Whether the reference is ready for immediate use.
    pub upload_ready: bool,
    /// Size of the published file in bytes.
    pub file_size: u64,
}

impl PublishOutcome {
    /// Fallback outcome used when publishing itself fails: the local file
    /// path is echoed back and the caller is told the upload is not ready.
    pub fn not_ready(path: &Path) -> Self {
        Self {
            video_url: Some(path.to_string_lossy().to_string()),
            video_data: None,
            upload_ready: false,
            file_size: 0,
        }
    }
}

/// External collaborator that persists an encoded file.
///
/// A `publish` error never fails the overall request; the pipeline absorbs
/// it and reports success with `upload_ready: false`.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, path: &Path) -> StorageResult<PublishOutcome>;
}
