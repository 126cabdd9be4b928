#![deny(unreachable_patterns)]
//! FFmpeg composition planning and execution.
//!
//! This crate provides:
//! - A scoped workspace handle for per-request temporary files
//! - HTTP asset download into the workspace
//! - FFprobe duration measurement
//! - The typed filter-graph IR and the composition planner
//! - Encoder argument emission and process execution

pub mod command;
pub mod download;
pub mod duration;
pub mod encode;
pub mod error;
pub mod graph;
pub mod probe;
pub mod workspace;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use download::{fetch_asset, fetch_candidates};
pub use duration::{planned_duration, FALLBACK_NARRATION_SECS};
pub use encode::{emit_command, EncodeInputs};
pub use error::{MediaError, MediaResult};
pub use graph::{build_plan, volume_multiplier, CompositionPlan, FilterStage, Pad, StageOp};
pub use probe::probe_duration;
pub use workspace::Workspace;
