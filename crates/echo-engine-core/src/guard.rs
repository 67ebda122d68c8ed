//! Input validation and downsampling for oversized sequences.
//!
//! The guard keeps worst-case input size bounded before it reaches the
//! fitting stage. Downsampling is a diagnostic/visualization aid only;
//! the fitting path always sees the original sequence.

use serde::Serialize;
use std::fmt;

use crate::config::{EngineConfig, DEFAULT_MAX_SEQUENCE_LEN};
use crate::error::CoreError;

/// Validates sequence shape and size limits.
#[derive(Debug, Clone)]
pub struct SequenceGuard {
    max_len: usize,
}

impl SequenceGuard {
    /// Guard accepting sequences up to `max_len` elements.
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Guard with the configured length bound.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::new(config.max_sequence_len)
    }

    /// Check length bounds and element finiteness.
    ///
    /// Expected-shape problems come back as a structured report, never a
    /// panic; the first offending element is identified by position and
    /// value.
    pub fn validate(&self, sequence: &[f64]) -> ValidationReport {
        if sequence.len() > self.max_len {
            return ValidationReport::invalid(ValidationIssue::TooLong {
                len: sequence.len(),
                max: self.max_len,
            });
        }

        for (position, &value) in sequence.iter().enumerate() {
            if !value.is_finite() {
                return ValidationReport::invalid(ValidationIssue::NonFinite { position, value });
            }
        }

        ValidationReport::valid()
    }

    /// True when the sequence exceeds `threshold` elements.
    #[inline]
    pub fn is_large(sequence: &[f64], threshold: usize) -> bool {
        sequence.len() > threshold
    }

    /// Keep every `factor`-th element, starting with the first.
    ///
    /// Produces `ceil(len / factor)` elements. A factor below 1 is
    /// treated as 1 (no reduction).
    pub fn downsample(sequence: &[f64], factor: usize) -> Vec<f64> {
        let factor = factor.max(1);
        sequence.iter().copied().step_by(factor).collect()
    }
}

impl Default for SequenceGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEQUENCE_LEN)
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Whether the sequence may proceed to analysis.
    pub valid: bool,
    /// The first problem found, when invalid.
    pub issue: Option<ValidationIssue>,
}

impl ValidationReport {
    fn valid() -> Self {
        Self {
            valid: true,
            issue: None,
        }
    }

    fn invalid(issue: ValidationIssue) -> Self {
        Self {
            valid: false,
            issue: Some(issue),
        }
    }
}

/// A concrete validation problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Sequence exceeds the configured length bound.
    TooLong {
        /// Observed length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// An element is NaN or infinite.
    NonFinite {
        /// Index of the offending element
        position: usize,
        /// The offending value
        value: f64,
    },
}

impl ValidationIssue {
    /// Convert into the engine error the issue corresponds to.
    pub fn into_error(self) -> CoreError {
        match self {
            Self::TooLong { len, max } => CoreError::SequenceTooLong { len, max },
            Self::NonFinite { position, value } => CoreError::InvalidInput { position, value },
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { len, max } => {
                write!(f, "sequence length {} exceeds maximum {}", len, max)
            }
            Self::NonFinite { position, value } => {
                write!(f, "element at position {} is not finite ({})", position, value)
            }
        }
    }
}
