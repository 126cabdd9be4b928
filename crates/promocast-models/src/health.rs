//! Health-check payload shared by adapters.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Health response, independent of the composition logic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

impl HealthStatus {
    /// A healthy status stamped with the current time.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: "promocast".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
