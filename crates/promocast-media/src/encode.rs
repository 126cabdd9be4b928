//! Encode plan emission.
//!
//! Turns a validated [`CompositionPlan`] plus the fixed output profile
//! into a complete, ordered encoder invocation.

use std::path::{Path, PathBuf};

use promocast_models::OutputProfile;

use crate::command::FfmpegCommand;
use crate::error::{MediaError, MediaResult};
use crate::graph::CompositionPlan;

/// Resolved local inputs for one encode, in declaration order:
/// narration first, background video second, overlay image third.
#[derive(Debug, Clone)]
pub struct EncodeInputs {
    pub narration: PathBuf,
    pub background_video: Option<PathBuf>,
    pub overlay_image: Option<PathBuf>,
}

impl EncodeInputs {
    pub fn new(narration: impl AsRef<Path>) -> Self {
        Self {
            narration: narration.as_ref().to_path_buf(),
            background_video: None,
            overlay_image: None,
        }
    }

    pub fn with_background_video(mut self, path: impl AsRef<Path>) -> Self {
        self.background_video = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_overlay_image(mut self, path: impl AsRef<Path>) -> Self {
        self.overlay_image = Some(path.as_ref().to_path_buf());
        self
    }
}

/// Emit the encoder invocation for a plan.
///
/// Fails with [`MediaError::InvalidPlan`] if the plan's invariants do not
/// hold; that indicates a planner bug, not a user-facing error.
pub fn emit_command(
    plan: &CompositionPlan,
    profile: &OutputProfile,
    inputs: &EncodeInputs,
    output: impl AsRef<Path>,
) -> MediaResult<FfmpegCommand> {
    plan.validate()?;

    if plan.stages.is_empty() {
        return Err(MediaError::invalid_plan("plan has no filter stages"));
    }

    let mut cmd = FfmpegCommand::new(output).input(&inputs.narration);
    if let Some(video) = &inputs.background_video {
        cmd = cmd.input(video);
    }
    if let Some(image) = &inputs.overlay_image {
        cmd = cmd.input(image);
    }

    Ok(cmd
        .filter_complex(plan.filter_script())
        .map(plan.final_video.render())
        .map(plan.final_audio.render())
        .trim_duration(plan.total_duration)
        .output_args(profile.to_ffmpeg_args()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_plan, Pad};

    fn inputs_full() -> EncodeInputs {
        EncodeInputs::new("/tmp/w/narration.mp3")
            .with_background_video("/tmp/w/video_0.mp4")
            .with_overlay_image("/tmp/w/image_0.jpg")
    }

    #[test]
    fn test_emit_full_composition() {
        let plan = build_plan(true, true, 90, 11.0);
        let cmd = emit_command(&plan, &OutputProfile::default(), &inputs_full(), "/tmp/w/out.mp4")
            .unwrap();
        let args = cmd.build_args();

        // Input order: narration, video, overlay
        let i_args: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-i")
            .map(|(i, _)| &args[i + 1])
            .collect();
        assert_eq!(
            i_args,
            ["/tmp/w/narration.mp3", "/tmp/w/video_0.mp4", "/tmp/w/image_0.jpg"]
        );

        // Map order: video pad first, audio pad second
        let maps: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-map")
            .map(|(i, _)| &args[i + 1])
            .collect();
        assert_eq!(maps, ["[final_video]", "[final_audio]"]);

        let t_pos = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t_pos + 1], "11.000");

        assert!(args.contains(&"-movflags".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/w/out.mp4");
    }

    #[test]
    fn test_emit_solid_background_maps_raw_audio() {
        let plan = build_plan(false, false, 90, 9.5);
        let cmd = emit_command(
            &plan,
            &OutputProfile::default(),
            &EncodeInputs::new("/tmp/w/narration.mp3"),
            "/tmp/w/out.mp4",
        )
        .unwrap();
        let args = cmd.build_args();

        let maps: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-map")
            .map(|(i, _)| &args[i + 1])
            .collect();
        assert_eq!(maps, ["[final_video]", "[0:a]"]);
    }

    #[test]
    fn test_emit_rejects_invalid_plan() {
        let mut plan = build_plan(true, false, 90, 11.0);
        plan.final_audio = Pad::labeled("nope");
        let err = emit_command(&plan, &OutputProfile::default(), &inputs_full(), "/tmp/out.mp4")
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidPlan(_)));
    }

    #[test]
    fn test_determinism() {
        let plan = build_plan(true, true, 90, 11.0);
        let profile = OutputProfile::default();
        let a = emit_command(&plan, &profile, &inputs_full(), "/tmp/out.mp4").unwrap();
        let b = emit_command(&plan, &profile, &inputs_full(), "/tmp/out.mp4").unwrap();
        assert_eq!(a.build_args(), b.build_args());
    }
}
