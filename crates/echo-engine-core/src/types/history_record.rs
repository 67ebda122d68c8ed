//! Append-only records of past analyses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Record identifier (UUID v4).
    pub id: Uuid,

    /// The analyzed sequence.
    pub sequence: Vec<f64>,

    /// Display name of the detected pattern.
    pub pattern: String,

    /// Confidence of the detection.
    pub confidence: f64,

    /// Forward extrapolation produced by the analysis.
    pub predictions: Vec<f64>,

    /// When the analysis ran (UTC).
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        sequence: Vec<f64>,
        pattern: impl Into<String>,
        confidence: f64,
        predictions: Vec<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            pattern: pattern.into(),
            confidence,
            predictions,
            timestamp: Utc::now(),
        }
    }

    /// Create a record with a specific timestamp (for testing/import).
    pub fn with_timestamp(
        sequence: Vec<f64>,
        pattern: impl Into<String>,
        confidence: f64,
        predictions: Vec<f64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            pattern: pattern.into(),
            confidence,
            predictions,
            timestamp,
        }
    }
}
