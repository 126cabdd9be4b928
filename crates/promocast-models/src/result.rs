//! Processing result schema.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::profile::OutputSpecs;

/// Terminal result of one composition call.
///
/// Serializes to a flat JSON object discriminated by the `success` flag,
/// matching the schema every adapter emits.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ProcessingResult {
    Success(SuccessReport),
    Failure(FailureReport),
}

/// Payload for a completed composition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SuccessReport {
    pub success: bool,

    /// Resolvable remote reference to the published video, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Base64-encoded video content, returned when the publish step
    /// prepares the upload for a downstream workflow instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_data: Option<String>,

    /// Whether the published reference is ready for immediate use.
    pub upload_ready: bool,

    /// Total output duration in seconds.
    pub duration: f64,

    /// ISO-8601 timestamp of when processing finished.
    pub processing_time: String,

    /// Encoded file size in bytes.
    pub file_size: u64,

    /// Echo of the fixed output profile.
    pub specs: OutputSpecs,
}

/// Payload for a failed composition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FailureReport {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl ProcessingResult {
    /// Build a success result stamped with the current time.
    pub fn success(
        video_url: Option<String>,
        video_data: Option<String>,
        upload_ready: bool,
        duration: f64,
        file_size: u64,
        specs: OutputSpecs,
    ) -> Self {
        Self::Success(SuccessReport {
            success: true,
            video_url,
            video_data,
            upload_ready,
            duration,
            processing_time: Utc::now().to_rfc3339(),
            file_size,
            specs,
        })
    }

    /// Build a failure result stamped with the current time.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(FailureReport {
            success: false,
            error: error.into(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::OutputProfile;

    #[test]
    fn test_success_serialization() {
        let result = ProcessingResult::success(
            Some("https://cdn.example.com/out.mp4".to_string()),
            None,
            true,
            11.0,
            1024,
            OutputProfile::default().specs(),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["upload_ready"], true);
        assert_eq!(json["duration"], 11.0);
        assert_eq!(json["file_size"], 1024);
        assert_eq!(json["specs"]["resolution"], "720x1280");
        assert!(json.get("video_data").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_serialization() {
        let result = ProcessingResult::failure("encoder exited with status 1");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "encoder exited with status 1");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_roundtrip_discrimination() {
        let failure = ProcessingResult::failure("boom");
        let json = serde_json::to_string(&failure).unwrap();
        let back: ProcessingResult = serde_json::from_str(&json).unwrap();
        assert!(!back.is_success());

        let success = ProcessingResult::success(
            None,
            Some("AAAA".to_string()),
            false,
            9.5,
            42,
            OutputProfile::default().specs(),
        );
        let json = serde_json::to_string(&success).unwrap();
        let back: ProcessingResult = serde_json::from_str(&json).unwrap();
        assert!(back.is_success());
    }
}
