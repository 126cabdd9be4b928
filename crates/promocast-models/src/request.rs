//! Composition request schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum number of background video candidates fetched per request.
pub const MAX_VIDEO_SOURCES: usize = 3;
/// Maximum number of overlay image candidates fetched per request.
pub const MAX_IMAGE_SOURCES: usize = 2;

/// Default background volume reduction (percent).
pub const DEFAULT_VOLUME_REDUCTION: u8 = 90;
/// Default padding added after the narration ends (seconds).
pub const DEFAULT_DURATION_EXTRA: u8 = 1;

/// A request to compose one promotional video.
///
/// This is the wire schema shared by every adapter. Up to
/// [`MAX_VIDEO_SOURCES`] videos and [`MAX_IMAGE_SOURCES`] images are
/// fetched, but only the first of each is used by the planner.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct CompositionRequest {
    /// URL of the narration audio track.
    #[validate(url)]
    pub audio_url: String,

    /// Background video candidates. Only the first entry is composited.
    #[serde(default)]
    pub video_urls: Vec<String>,

    /// Overlay image candidates. Only the first entry is composited.
    #[serde(default)]
    pub image_urls: Vec<String>,

    /// How much to reduce the background video's audio, in percent.
    /// 100 silences it entirely, 0 passes it at full level.
    #[serde(default = "default_volume_reduction")]
    #[validate(range(max = 100))]
    pub video_volume_reduction: u8,

    /// Seconds added to the narration duration to get the output duration.
    #[serde(default = "default_duration_extra")]
    #[validate(range(max = 10))]
    pub output_duration_extra: u8,
}

fn default_volume_reduction() -> u8 {
    DEFAULT_VOLUME_REDUCTION
}

fn default_duration_extra() -> u8 {
    DEFAULT_DURATION_EXTRA
}

impl CompositionRequest {
    /// Create a request with default tuning for the given narration URL.
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            video_urls: Vec::new(),
            image_urls: Vec::new(),
            video_volume_reduction: DEFAULT_VOLUME_REDUCTION,
            output_duration_extra: DEFAULT_DURATION_EXTRA,
        }
    }

    /// Whether a background video will be composited.
    pub fn has_background_video(&self) -> bool {
        !self.video_urls.is_empty()
    }

    /// Whether an overlay image will be composited.
    pub fn has_overlay_image(&self) -> bool {
        !self.image_urls.is_empty()
    }

    /// Return a copy with out-of-domain numeric fields clamped.
    ///
    /// The planner assumes its caller already clamped these, so the
    /// pipeline normalizes every inbound request through this method.
    pub fn clamped(mut self) -> Self {
        self.video_volume_reduction = self.video_volume_reduction.min(100);
        self.output_duration_extra = self.output_duration_extra.min(10);
        self
    }

    /// Video URLs capped at the fetch limit.
    pub fn capped_video_urls(&self) -> &[String] {
        let end = self.video_urls.len().min(MAX_VIDEO_SOURCES);
        &self.video_urls[..end]
    }

    /// Image URLs capped at the fetch limit.
    pub fn capped_image_urls(&self) -> &[String] {
        let end = self.image_urls.len().min(MAX_IMAGE_SOURCES);
        &self.image_urls[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_defaults() {
        let req: CompositionRequest =
            serde_json::from_str(r#"{"audio_url": "https://example.com/voice.mp3"}"#).unwrap();
        assert_eq!(req.video_volume_reduction, 90);
        assert_eq!(req.output_duration_extra, 1);
        assert!(req.video_urls.is_empty());
        assert!(req.image_urls.is_empty());
        assert!(!req.has_background_video());
        assert!(!req.has_overlay_image());
    }

    #[test]
    fn test_clamped() {
        let mut req = CompositionRequest::new("https://example.com/voice.mp3");
        req.video_volume_reduction = 250;
        req.output_duration_extra = 99;
        let req = req.clamped();
        assert_eq!(req.video_volume_reduction, 100);
        assert_eq!(req.output_duration_extra, 10);
    }

    #[test]
    fn test_fetch_caps() {
        let mut req = CompositionRequest::new("https://example.com/voice.mp3");
        req.video_urls = (0..5).map(|i| format!("https://example.com/v{i}.mp4")).collect();
        req.image_urls = (0..4).map(|i| format!("https://example.com/i{i}.png")).collect();
        assert_eq!(req.capped_video_urls().len(), MAX_VIDEO_SOURCES);
        assert_eq!(req.capped_image_urls().len(), MAX_IMAGE_SOURCES);
        assert_eq!(req.capped_video_urls()[0], "https://example.com/v0.mp4");
    }

    #[test]
    fn test_validation() {
        let req: CompositionRequest = serde_json::from_str(
            r#"{"audio_url": "https://example.com/voice.mp3", "video_volume_reduction": 101}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
        assert!(req.clamped().validate().is_ok());
    }

    #[test]
    fn test_invalid_audio_url() {
        let req = CompositionRequest::new("not a url");
        assert!(req.validate().is_err());
    }
}
