//! Pattern classification tags and prediction results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of generative patterns the engine can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Constant difference between consecutive terms.
    Arithmetic,

    /// Constant ratio between consecutive terms.
    Geometric,

    /// Constant `degree`-th finite difference.
    Polynomial {
        /// Degree of the fitted polynomial
        degree: usize,
    },
}

impl PatternKind {
    /// Human-readable pattern name.
    pub fn display_name(&self) -> String {
        match self {
            Self::Arithmetic => "Arithmetic Progression".to_string(),
            Self::Geometric => "Geometric Progression".to_string(),
            Self::Polynomial { degree } => format!("Polynomial (Degree {})", degree),
        }
    }

    /// Machine-readable type tag.
    #[inline]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::Geometric => "geometric",
            Self::Polynomial { .. } => "polynomial",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A complete prediction for one sequence.
///
/// `parameters` holds the fitted model parameters: the common difference
/// for arithmetic, the common ratio for geometric, and the constant
/// top-order difference for polynomial fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Detected pattern kind.
    pub kind: PatternKind,

    /// Human-readable pattern name.
    pub name: String,

    /// Confidence of the fit (0.0 or 1.0 in the current hypothesis set).
    pub confidence: f64,

    /// Fitted model parameters.
    pub parameters: Vec<f64>,

    /// The single next extrapolated value.
    pub next_value: f64,

    /// Multi-step forward extrapolation, starting with `next_value`.
    pub predictions: Vec<f64>,
}

/// Per-hypothesis confidence, for diagnostics.
///
/// Reported by the analyzer's introspection path; never used for winner
/// selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternScore {
    /// Hypothesis kind.
    pub kind: PatternKind,

    /// Human-readable hypothesis name.
    pub name: String,

    /// Confidence the hypothesis achieved on the sequence.
    pub confidence: f64,
}
