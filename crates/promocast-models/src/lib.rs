//! Shared data models for the Promocast composer.
//!
//! This crate provides Serde-serializable types for:
//! - Composition requests (the wire schema consumed by all adapters)
//! - The fixed output profile (resolution, codecs, container layout)
//! - Processing results (success and failure payloads)
//! - Health-check responses

pub mod health;
pub mod profile;
pub mod request;
pub mod result;

// Re-export common types
pub use health::HealthStatus;
pub use profile::{OutputProfile, OutputSpecs};
pub use request::{CompositionRequest, MAX_IMAGE_SOURCES, MAX_VIDEO_SOURCES};
pub use result::{FailureReport, ProcessingResult, SuccessReport};
