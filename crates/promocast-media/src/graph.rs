//! Typed filter-graph IR and the composition planner.
//!
//! The plan is an explicit list of stage descriptors with named input and
//! output pads; the textual encoder script is a pure serialization step.
//! `build_plan` is a pure function of its arguments, so two identical
//! requests always produce identical plans.

use promocast_models::profile::{OUTPUT_HEIGHT, OUTPUT_WIDTH};

use crate::error::{MediaError, MediaResult};

/// Overlay thumbnail edge length in pixels.
pub const OVERLAY_THUMB_SIZE: u32 = 200;
/// Overlay offset from the top-right corner in pixels.
pub const OVERLAY_MARGIN: u32 = 20;
/// Overlay visibility window on the output timeline, in seconds.
/// Fixed regardless of total duration.
pub const OVERLAY_WINDOW: (f64, f64) = (3.0, 6.0);
/// Background color used when no video is supplied.
pub const BACKGROUND_COLOR: &str = "black";

/// A named reference to a stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pad {
    /// A raw demuxer stream, e.g. `0:a`.
    Input(String),
    /// A stream produced by a filter stage, e.g. `bg_video`.
    Labeled(String),
}

impl Pad {
    pub fn input(name: impl Into<String>) -> Self {
        Self::Input(name.into())
    }

    pub fn labeled(name: impl Into<String>) -> Self {
        Self::Labeled(name.into())
    }

    /// Render as ffmpeg pad syntax, e.g. `[0:a]` or `[bg_video]`.
    pub fn render(&self) -> String {
        match self {
            Self::Input(name) | Self::Labeled(name) => format!("[{name}]"),
        }
    }
}

/// One unit of visual or audio transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOp {
    /// Synthesize a solid full-frame background for a fixed duration.
    SolidColor {
        color: String,
        width: u32,
        height: u32,
        duration: f64,
    },
    /// Scale preserving aspect ratio to cover the target, center-crop to
    /// it exactly, and set square pixel aspect.
    ScaleCrop { width: u32, height: u32 },
    /// Scale to a fixed thumbnail size.
    ScaleThumb { width: u32, height: u32 },
    /// Composite the second input onto the first at a fixed offset from
    /// the top-right corner, visible only inside `window`.
    Overlay { margin: u32, window: (f64, f64) },
    /// Apply a linear volume multiplier.
    Volume { multiplier: f64 },
    /// Mix two audio streams, as long as the first input, no fade-out.
    Mix,
}

impl StageOp {
    /// Number of input pads this operation consumes.
    fn arity(&self) -> usize {
        match self {
            Self::SolidColor { .. } => 0,
            Self::ScaleCrop { .. } | Self::ScaleThumb { .. } | Self::Volume { .. } => 1,
            Self::Overlay { .. } | Self::Mix => 2,
        }
    }

    /// Render the ffmpeg filter text, without pads.
    fn filter_text(&self) -> String {
        match self {
            Self::SolidColor {
                color,
                width,
                height,
                duration,
            } => format!("color={color}:size={width}x{height}:duration={duration}"),
            Self::ScaleCrop { width, height } => format!(
                "scale={width}:{height}:force_original_aspect_ratio=increase,\
                 crop={width}:{height},setsar=1"
            ),
            Self::ScaleThumb { width, height } => format!("scale={width}:{height}"),
            Self::Overlay {
                margin,
                window: (start, end),
            } => format!("overlay=W-w-{margin}:{margin}:enable='between(t,{start},{end})'"),
            Self::Volume { multiplier } => format!("volume={multiplier}"),
            Self::Mix => "amix=inputs=2:duration=first:dropout_transition=0".to_string(),
        }
    }
}

/// One filter stage: operation, input pads, uniquely labeled output pad.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStage {
    pub op: StageOp,
    pub inputs: Vec<Pad>,
    pub output: Pad,
}

impl FilterStage {
    pub fn new(op: StageOp, inputs: Vec<Pad>, output: Pad) -> Self {
        Self { op, inputs, output }
    }

    /// Render as one ffmpeg filter statement.
    pub fn render(&self) -> String {
        let inputs: String = self.inputs.iter().map(Pad::render).collect();
        format!("{}{}{}", inputs, self.op.filter_text(), self.output.render())
    }
}

/// The resolved description of how layers combine into the final timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionPlan {
    /// Total output duration in seconds. Always at least the narration
    /// duration.
    pub total_duration: f64,
    /// Filter stages in dependency order.
    pub stages: Vec<FilterStage>,
    /// Pad mapped as the output video stream.
    pub final_video: Pad,
    /// Pad mapped as the output audio stream.
    pub final_audio: Pad,
}

impl CompositionPlan {
    /// Serialize the stages as one `-filter_complex` script.
    pub fn filter_script(&self) -> String {
        self.stages
            .iter()
            .map(FilterStage::render)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Check structural invariants.
    ///
    /// Labeled pads must be produced by exactly one stage, consumed only
    /// after production, and both final pads must resolve. A violation is
    /// a planner defect, not a user input error.
    pub fn validate(&self) -> MediaResult<()> {
        let mut produced: Vec<&str> = Vec::new();

        for stage in &self.stages {
            if stage.inputs.len() != stage.op.arity() {
                return Err(MediaError::invalid_plan(format!(
                    "stage {:?} expects {} input pad(s), got {}",
                    stage.op,
                    stage.op.arity(),
                    stage.inputs.len()
                )));
            }

            for input in &stage.inputs {
                if let Pad::Labeled(name) = input {
                    if !produced.contains(&name.as_str()) {
                        return Err(MediaError::invalid_plan(format!(
                            "pad [{name}] consumed before production"
                        )));
                    }
                }
            }

            match &stage.output {
                Pad::Labeled(name) => {
                    if produced.contains(&name.as_str()) {
                        return Err(MediaError::invalid_plan(format!(
                            "pad [{name}] produced by more than one stage"
                        )));
                    }
                    produced.push(name);
                }
                Pad::Input(name) => {
                    return Err(MediaError::invalid_plan(format!(
                        "stage output [{name}] must be a labeled pad"
                    )));
                }
            }
        }

        for (role, pad) in [("video", &self.final_video), ("audio", &self.final_audio)] {
            if let Pad::Labeled(name) = pad {
                if !produced.contains(&name.as_str()) {
                    return Err(MediaError::invalid_plan(format!(
                        "final {role} pad [{name}] is not produced by any stage"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Linear volume multiplier for a given reduction percentage.
///
/// 100 silences the background entirely; 0 passes it at full level.
/// The caller is responsible for clamping the percentage to [0, 100].
pub fn volume_multiplier(reduction_percent: u8) -> f64 {
    f64::from(100 - reduction_percent.min(100)) / 100.0
}

/// Decide the composition topology and audio mix.
///
/// Three cases: solid background, video-only, video plus overlay. An
/// overlay supplied without a background video is deliberately ignored,
/// matching the upstream contract.
pub fn build_plan(
    has_background_video: bool,
    has_overlay_image: bool,
    volume_reduction_percent: u8,
    total_duration: f64,
) -> CompositionPlan {
    let mut stages = Vec::new();

    let final_video;
    let final_audio;

    if has_background_video {
        stages.push(FilterStage::new(
            StageOp::ScaleCrop {
                width: OUTPUT_WIDTH,
                height: OUTPUT_HEIGHT,
            },
            vec![Pad::input("1:v")],
            Pad::labeled("bg_video"),
        ));

        if has_overlay_image {
            stages.push(FilterStage::new(
                StageOp::ScaleThumb {
                    width: OVERLAY_THUMB_SIZE,
                    height: OVERLAY_THUMB_SIZE,
                },
                vec![Pad::input("2:v")],
                Pad::labeled("overlay_img"),
            ));
            stages.push(FilterStage::new(
                StageOp::Overlay {
                    margin: OVERLAY_MARGIN,
                    window: OVERLAY_WINDOW,
                },
                vec![Pad::labeled("bg_video"), Pad::labeled("overlay_img")],
                Pad::labeled("final_video"),
            ));
            final_video = Pad::labeled("final_video");
        } else {
            final_video = Pad::labeled("bg_video");
        }

        stages.push(FilterStage::new(
            StageOp::Volume {
                multiplier: volume_multiplier(volume_reduction_percent),
            },
            vec![Pad::input("1:a")],
            Pad::labeled("bg_audio"),
        ));
        stages.push(FilterStage::new(
            StageOp::Mix,
            vec![Pad::input("0:a"), Pad::labeled("bg_audio")],
            Pad::labeled("final_audio"),
        ));
        final_audio = Pad::labeled("final_audio");
    } else {
        // No background: synthesize a solid frame and pass the narration
        // through unmodified. Any supplied overlay is not applied here.
        stages.push(FilterStage::new(
            StageOp::SolidColor {
                color: BACKGROUND_COLOR.to_string(),
                width: OUTPUT_WIDTH,
                height: OUTPUT_HEIGHT,
                duration: total_duration,
            },
            vec![],
            Pad::labeled("final_video"),
        ));
        final_video = Pad::labeled("final_video");
        final_audio = Pad::input("0:a");
    }

    CompositionPlan {
        total_duration,
        stages,
        final_video,
        final_audio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_multiplier() {
        assert_eq!(volume_multiplier(100), 0.0);
        assert_eq!(volume_multiplier(0), 1.0);
        assert_eq!(volume_multiplier(50), 0.5);
        assert_eq!(volume_multiplier(90), 0.1);
    }

    #[test]
    fn test_solid_background_plan() {
        let plan = build_plan(false, false, 90, 9.5);
        assert_eq!(plan.total_duration, 9.5);
        assert_eq!(plan.stages.len(), 1);
        assert_eq!(plan.final_audio, Pad::input("0:a"));
        plan.validate().unwrap();

        let script = plan.filter_script();
        assert_eq!(script, "color=black:size=720x1280:duration=9.5[final_video]");
    }

    #[test]
    fn test_solid_background_ignores_overlay() {
        // Overlay without background video is dropped, not composited.
        let with = build_plan(false, true, 90, 9.5);
        let without = build_plan(false, false, 90, 9.5);
        assert_eq!(with, without);
    }

    #[test]
    fn test_video_only_plan() {
        let plan = build_plan(true, false, 90, 11.0);
        plan.validate().unwrap();
        assert_eq!(plan.final_video, Pad::labeled("bg_video"));
        assert_eq!(plan.final_audio, Pad::labeled("final_audio"));

        let script = plan.filter_script();
        assert_eq!(
            script,
            "[1:v]scale=720:1280:force_original_aspect_ratio=increase,\
             crop=720:1280,setsar=1[bg_video];\
             [1:a]volume=0.1[bg_audio];\
             [0:a][bg_audio]amix=inputs=2:duration=first:dropout_transition=0[final_audio]"
        );
    }

    #[test]
    fn test_video_and_overlay_plan() {
        let plan = build_plan(true, true, 50, 11.0);
        plan.validate().unwrap();
        assert_eq!(plan.final_video, Pad::labeled("final_video"));

        let script = plan.filter_script();
        assert!(script.contains("[2:v]scale=200:200[overlay_img]"));
        assert!(script
            .contains("[bg_video][overlay_img]overlay=W-w-20:20:enable='between(t,3,6)'[final_video]"));
        assert!(script.contains("[1:a]volume=0.5[bg_audio]"));
    }

    #[test]
    fn test_overlay_window_fixed_for_short_output() {
        // Window stays [3, 6] even when the output ends before 6s; the
        // overlay simply never appears past the trim.
        let plan = build_plan(true, true, 90, 4.0);
        plan.validate().unwrap();
        assert!(plan.filter_script().contains("between(t,3,6)"));
    }

    #[test]
    fn test_determinism() {
        let a = build_plan(true, true, 90, 11.0);
        let b = build_plan(true, true, 90, 11.0);
        assert_eq!(a, b);
        assert_eq!(a.filter_script(), b.filter_script());
    }

    #[test]
    fn test_validate_rejects_dangling_final_pad() {
        let mut plan = build_plan(true, false, 90, 11.0);
        plan.final_video = Pad::labeled("missing");
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_validate_rejects_duplicate_output() {
        let mut plan = build_plan(false, false, 90, 9.5);
        let dup = plan.stages[0].clone();
        plan.stages.push(dup);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_consume_before_production() {
        let plan = CompositionPlan {
            total_duration: 5.0,
            stages: vec![FilterStage::new(
                StageOp::Volume { multiplier: 0.5 },
                vec![Pad::labeled("never_made")],
                Pad::labeled("out"),
            )],
            final_video: Pad::input("0:v"),
            final_audio: Pad::labeled("out"),
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_integer_durations_render_bare() {
        let plan = build_plan(false, false, 90, 11.0);
        assert!(plan.filter_script().contains("duration=11[final_video]"));
    }
}
