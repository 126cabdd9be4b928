//! HTTP adapter for the Promocast composer.
//!
//! A thin transport shim: parses the request schema, forwards it to the
//! shared pipeline, and serializes the result schema back out, plus a
//! health check independent of the composition logic.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
