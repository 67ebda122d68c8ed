//! Error types for the core engine.
//!
//! Fitting-stage inapplicability (e.g. a geometric hypothesis over a
//! sequence containing zero) is not an error: it yields confidence 0.0
//! for that hypothesis only. The variants here cover malformed top-level
//! input, the no-match outcome, misuse of unfitted patterns, and
//! best-effort storage failures.

use thiserror::Error;

/// Errors surfaced by the core engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sequence shorter than any hypothesis can support.
    #[error("insufficient data: a sequence needs at least 2 elements, got {len}")]
    InsufficientData {
        /// Length of the rejected sequence
        len: usize,
    },

    /// Well-formed sequence for which no hypothesis reached full
    /// confidence. A normal no-match branch, not a fatal failure.
    #[error("no pattern hypothesis reached full confidence for this sequence")]
    UnrecognizedPattern,

    /// Prediction requested from a hypothesis that was never fitted to a
    /// sequence. Programming-error class; fails loudly.
    #[error("pattern has not been fitted to a sequence; predictions are unavailable")]
    UnanalyzedPattern,

    /// A sequence element is not a finite real number.
    #[error("invalid input: element at position {position} is not a finite number ({value})")]
    InvalidInput {
        /// Index of the offending element
        position: usize,
        /// The offending value
        value: f64,
    },

    /// Sequence exceeds the configured length bound.
    #[error("sequence length {len} exceeds the configured maximum of {max}")]
    SequenceTooLong {
        /// Length of the rejected sequence
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// History persistence failed. Best-effort relative to predictions;
    /// only the explicit persist path propagates this.
    #[error("history storage error: {0}")]
    Storage(String),
}

/// Result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_detail() {
        let err = CoreError::InvalidInput {
            position: 3,
            value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("position 3"));

        let err = CoreError::SequenceTooLong { len: 200, max: 100 };
        assert!(err.to_string().contains("200"));
        assert!(err.to_string().contains("100"));
    }
}
