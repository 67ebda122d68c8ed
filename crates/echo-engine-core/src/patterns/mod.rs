//! Pattern hypotheses over numeric sequences.
//!
//! Each hypothesis fits its model eagerly at construction and is
//! immutable afterwards. Confidence is binary in the current set: 1.0
//! when every position fits within tolerance, 0.0 otherwise (the
//! hypothesis is rejected, never silently degraded). An inapplicable
//! hypothesis (geometric over a zero term, polynomial over too short an
//! input) also reports 0.0 rather than erroring, so detection can move
//! on to the next candidate.

mod arithmetic;
mod geometric;
mod polynomial;

pub use arithmetic::ArithmeticPattern;
pub use geometric::GeometricPattern;
pub use polynomial::PolynomialPattern;

use crate::config::EPSILON;
use crate::error::CoreResult;
use crate::types::PatternKind;

/// Scale-aware tolerance comparison.
///
/// Two values match when `|a - b| <= EPSILON * max(1, |a|, |b|)`, keeping
/// the tolerance meaningful for large magnitudes.
pub(crate) fn values_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON * 1.0_f64.max(a.abs()).max(b.abs())
}

/// A fitted pattern hypothesis, uniform over the closed variant set.
#[derive(Debug, Clone)]
pub enum PatternModel {
    /// Constant-difference progression.
    Arithmetic(ArithmeticPattern),
    /// Constant-ratio progression.
    Geometric(GeometricPattern),
    /// Polynomial progression of a fixed degree.
    Polynomial(PolynomialPattern),
}

impl PatternModel {
    /// Pattern kind tag.
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Arithmetic(_) => PatternKind::Arithmetic,
            Self::Geometric(_) => PatternKind::Geometric,
            Self::Polynomial(p) => PatternKind::Polynomial { degree: p.degree() },
        }
    }

    /// Human-readable pattern name.
    pub fn name(&self) -> String {
        self.kind().display_name()
    }

    /// Confidence the fit achieved (0.0 or 1.0).
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Arithmetic(p) => p.confidence(),
            Self::Geometric(p) => p.confidence(),
            Self::Polynomial(p) => p.confidence(),
        }
    }

    /// Fitted model parameters.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            Self::Arithmetic(p) => p.parameters(),
            Self::Geometric(p) => p.parameters(),
            Self::Polynomial(p) => p.parameters(),
        }
    }

    /// The single next extrapolated value.
    pub fn next_value(&self) -> CoreResult<f64> {
        match self {
            Self::Arithmetic(p) => p.next_value(),
            Self::Geometric(p) => p.next_value(),
            Self::Polynomial(p) => p.next_value(),
        }
    }

    /// Extrapolate `steps` values forward.
    pub fn predict(&self, steps: usize) -> CoreResult<Vec<f64>> {
        match self {
            Self::Arithmetic(p) => p.predict(steps),
            Self::Geometric(p) => p.predict(steps),
            Self::Polynomial(p) => p.predict(steps),
        }
    }
}
