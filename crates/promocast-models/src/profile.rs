//! Fixed output profile for composed videos.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output frame width in pixels (vertical 9:16).
pub const OUTPUT_WIDTH: u32 = 720;
/// Output frame height in pixels.
pub const OUTPUT_HEIGHT: u32 = 1280;
/// Output frame rate.
pub const OUTPUT_FPS: u32 = 30;
/// Video codec (H.264).
pub const VIDEO_CODEC: &str = "libx264";
/// Encoding preset.
pub const PRESET: &str = "fast";
/// Constant Rate Factor (quality, lower is better).
pub const CRF: u8 = 23;
/// Audio codec.
pub const AUDIO_CODEC: &str = "aac";
/// Audio bitrate.
pub const AUDIO_BITRATE: &str = "128k";
/// Pixel format for broad playback compatibility.
pub const PIXEL_FORMAT: &str = "yuv420p";
/// Container format.
pub const CONTAINER_FORMAT: &str = "mp4";

/// The device specification every composed video targets.
///
/// These values are not configurable per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutputProfile {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub video_codec: String,
    pub preset: String,
    pub crf: u8,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub pixel_format: String,
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self {
            width: OUTPUT_WIDTH,
            height: OUTPUT_HEIGHT,
            fps: OUTPUT_FPS,
            video_codec: VIDEO_CODEC.to_string(),
            preset: PRESET.to_string(),
            crf: CRF,
            audio_codec: AUDIO_CODEC.to_string(),
            audio_bitrate: AUDIO_BITRATE.to_string(),
            pixel_format: PIXEL_FORMAT.to_string(),
        }
    }
}

impl OutputProfile {
    /// Convert to FFmpeg output arguments.
    ///
    /// Streaming-optimized container layout (`+faststart`) is always set.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
            "-r".to_string(),
            self.fps.to_string(),
            "-pix_fmt".to_string(),
            self.pixel_format.clone(),
            "-movflags".to_string(),
            "+faststart".to_string(),
        ]
    }

    /// The specs block echoed in successful results.
    pub fn specs(&self) -> OutputSpecs {
        OutputSpecs {
            resolution: format!("{}x{}", self.width, self.height),
            fps: self.fps,
            format: CONTAINER_FORMAT.to_string(),
            audio_codec: self.audio_codec.clone(),
            video_codec: self.video_codec.clone(),
        }
    }
}

/// Output specification summary echoed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutputSpecs {
    pub resolution: String,
    pub fps: u32,
    pub format: String,
    pub audio_codec: String,
    pub video_codec: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = OutputProfile::default();
        assert_eq!(profile.width, 720);
        assert_eq!(profile.height, 1280);
        assert_eq!(profile.video_codec, "libx264");
        assert_eq!(profile.crf, 23);
    }

    #[test]
    fn test_ffmpeg_args() {
        let args = OutputProfile::default().to_ffmpeg_args();
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&"23".to_string()));
        assert!(args.contains(&"+faststart".to_string()));
        assert!(args.contains(&"yuv420p".to_string()));
        // Frame rate comes right after -r
        let r_pos = args.iter().position(|a| a == "-r").unwrap();
        assert_eq!(args[r_pos + 1], "30");
    }

    #[test]
    fn test_specs() {
        let specs = OutputProfile::default().specs();
        assert_eq!(specs.resolution, "720x1280");
        assert_eq!(specs.fps, 30);
        assert_eq!(specs.format, "mp4");
        assert_eq!(specs.audio_codec, "aac");
        assert_eq!(specs.video_codec, "libx264");
    }
}
