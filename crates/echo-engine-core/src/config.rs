//! Engine configuration and tuning constants.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tolerance for treating two floating-point values as equal.
///
/// Comparisons are scale-aware: two values match when their absolute
/// difference is at most `EPSILON * max(1, |a|, |b|)`, so the tolerance
/// stays meaningful for large magnitudes.
pub const EPSILON: f64 = 1e-9;

/// Highest polynomial degree the analyzer will try. Bounds detection cost.
pub const DEFAULT_MAX_DEGREE: usize = 5;

/// Forward prediction steps used when a caller does not specify a count.
pub const DEFAULT_PREDICTION_STEPS: usize = 5;

/// Default capacity of the shared analysis cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Default upper bound on accepted sequence length.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 100_000;

/// Default threshold above which a sequence counts as "large" for
/// diagnostic downsampling.
pub const DEFAULT_LARGE_THRESHOLD: usize = 10_000;

/// Engine configuration.
///
/// All fields have working defaults; deserializing a partial document
/// fills the rest from [`EngineConfig::default`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of the shared analysis cache (FIFO eviction beyond this).
    pub cache_capacity: usize,

    /// Hard upper bound on accepted sequence length.
    pub max_sequence_len: usize,

    /// Highest polynomial degree evaluated during detection.
    pub max_degree: usize,

    /// Prediction steps used when the caller leaves the count unspecified.
    pub default_steps: usize,

    /// Length above which a sequence is considered large.
    pub large_threshold: usize,

    /// Location of the persisted history snapshot, if any.
    pub history_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            max_degree: DEFAULT_MAX_DEGREE,
            default_steps: DEFAULT_PREDICTION_STEPS,
            large_threshold: DEFAULT_LARGE_THRESHOLD,
            history_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: EngineConfig = serde_json::from_str(r#"{"cache_capacity": 16}"#)
            .expect("partial config should deserialize");

        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.max_degree, DEFAULT_MAX_DEGREE);
        assert_eq!(config.default_steps, DEFAULT_PREDICTION_STEPS);
        assert!(config.history_path.is_none());
    }
}
