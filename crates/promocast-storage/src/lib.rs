//! Publish step for composed videos.
//!
//! This crate provides:
//! - The [`Publisher`] trait the pipeline delegates persistence to
//! - A Supabase-storage publisher that prepares the upload payload
//! - The publish outcome consumed by the result reporter

pub mod client;
pub mod error;
pub mod publisher;

pub use client::SupabasePublisher;
pub use error::{StorageError, StorageResult};
pub use publisher::{PublishOutcome, Publisher};
