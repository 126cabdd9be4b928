//! Output duration derivation.

use tracing::warn;

use crate::error::MediaResult;

/// Narration duration substituted when probing fails.
pub const FALLBACK_NARRATION_SECS: f64 = 15.0;

/// Derive the total output duration from a probe result and the configured
/// pad in seconds.
///
/// A failed or nonsensical probe is recovered locally with
/// [`FALLBACK_NARRATION_SECS`] rather than failing the request. The total
/// is always at least the (effective) narration duration.
pub fn planned_duration(probed: MediaResult<f64>, extra_seconds: u8) -> f64 {
    let narration = match probed {
        Ok(d) if d.is_finite() && d > 0.0 => d,
        Ok(d) => {
            warn!("Probed narration duration {} is unusable, using fallback", d);
            FALLBACK_NARRATION_SECS
        }
        Err(e) => {
            warn!("Failed to probe narration duration: {}, using fallback", e);
            FALLBACK_NARRATION_SECS
        }
    };
    narration + f64::from(extra_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;

    #[test]
    fn test_probed_plus_extra() {
        assert_eq!(planned_duration(Ok(10.0), 1), 11.0);
        assert_eq!(planned_duration(Ok(8.5), 1), 9.5);
        assert_eq!(planned_duration(Ok(8.5), 0), 8.5);
    }

    #[test]
    fn test_fallback_on_probe_failure() {
        let err = Err(MediaError::ffprobe_failed("boom", None));
        assert_eq!(planned_duration(err, 1), 16.0);
    }

    #[test]
    fn test_fallback_on_unusable_duration() {
        assert_eq!(planned_duration(Ok(0.0), 2), 17.0);
        assert_eq!(planned_duration(Ok(f64::NAN), 0), 15.0);
        assert_eq!(planned_duration(Ok(-3.0), 0), 15.0);
    }
}
