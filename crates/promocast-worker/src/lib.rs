//! Promocast composition pipeline.
//!
//! One [`Composer`] instance serves every adapter. Each call acquires its
//! assets into a scoped workspace, plans the composition, drives FFmpeg
//! once, reports a structured result, and releases the workspace on every
//! exit path.

pub mod composer;
pub mod config;
pub mod error;
pub mod logging;

pub use composer::Composer;
pub use config::ComposerConfig;
pub use error::{ComposeError, ComposeResult};
pub use logging::RequestLogger;
