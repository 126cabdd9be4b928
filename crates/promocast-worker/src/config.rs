//! Pipeline configuration.

/// Composer configuration.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Wall-clock timeout for one encoder invocation, in seconds
    pub encode_timeout_secs: u64,
    /// FFmpeg log level
    pub ffmpeg_log_level: String,
    /// Fetch every capped candidate even though only the first is used.
    /// Matches the upstream contract; set false to skip the wasted fetches.
    pub fetch_all_candidates: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            encode_timeout_secs: 300,
            ffmpeg_log_level: "error".to_string(),
            fetch_all_candidates: true,
        }
    }
}

impl ComposerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            encode_timeout_secs: std::env::var("COMPOSER_ENCODE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            ffmpeg_log_level: std::env::var("COMPOSER_FFMPEG_LOG_LEVEL")
                .unwrap_or_else(|_| "error".to_string()),
            fetch_all_candidates: std::env::var("COMPOSER_FETCH_ALL_CANDIDATES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComposerConfig::default();
        assert_eq!(config.encode_timeout_secs, 300);
        assert_eq!(config.ffmpeg_log_level, "error");
        assert!(config.fetch_all_candidates);
    }
}
