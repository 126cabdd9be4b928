//! Pipeline error types.

use thiserror::Error;

use promocast_media::MediaError;
use promocast_storage::StorageError;

pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that fail a composition call.
///
/// Probe failures and publish failures never appear here; both are
/// recovered locally inside the pipeline.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComposeError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// The message placed in the failure result.
    ///
    /// Encoder failures reproduce the encoder's diagnostic output verbatim.
    pub fn report(&self) -> String {
        match self {
            Self::Media(MediaError::FfmpegFailed {
                stderr: Some(stderr),
                ..
            }) => format!("FFmpeg processing failed: {stderr}"),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_report_carries_stderr_verbatim() {
        let err = ComposeError::from(MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some("[aac @ 0x1] Invalid frame size\n".to_string()),
            Some(1),
        ));
        assert_eq!(
            err.report(),
            "FFmpeg processing failed: [aac @ 0x1] Invalid frame size\n"
        );
    }

    #[test]
    fn test_other_report_uses_display() {
        let err = ComposeError::invalid_request("audio_url is required");
        assert_eq!(err.report(), "Invalid request: audio_url is required");
    }
}
