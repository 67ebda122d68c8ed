//! Constant-ratio (geometric progression) hypothesis.

use super::values_match;
use crate::error::{CoreError, CoreResult};

/// Geometric progression fit: `seq[i+1] = seq[i] * r`.
///
/// A sequence containing any zero term has no defined ratio and makes
/// the hypothesis inapplicable (confidence 0.0, not an error). Negative
/// ratios are supported; predictions preserve sign alternation.
#[derive(Debug, Clone, Default)]
pub struct GeometricPattern {
    sequence: Vec<f64>,
    ratio: Option<f64>,
}

impl GeometricPattern {
    /// Fit the hypothesis to a sequence.
    pub fn new(sequence: &[f64]) -> Self {
        Self {
            sequence: sequence.to_vec(),
            ratio: Self::fit(sequence),
        }
    }

    fn fit(sequence: &[f64]) -> Option<f64> {
        if sequence.len() < 2 {
            return None;
        }
        // Zero terms leave the ratio undefined
        if sequence.iter().any(|&v| v == 0.0) {
            return None;
        }

        let ratio = sequence[1] / sequence[0];
        let consistent = sequence
            .windows(2)
            .all(|pair| values_match(pair[1] / pair[0], ratio));

        consistent.then_some(ratio)
    }

    /// Confidence of the fit: 1.0 when every ratio matches, else 0.0.
    #[inline]
    pub fn confidence(&self) -> f64 {
        if self.ratio.is_some() { 1.0 } else { 0.0 }
    }

    /// The common ratio, when the fit succeeded.
    #[inline]
    pub fn common_ratio(&self) -> Option<f64> {
        self.ratio
    }

    /// Fitted parameters: `[r]`.
    pub fn parameters(&self) -> Vec<f64> {
        self.ratio.into_iter().collect()
    }

    /// Next value: `seq[last] * r`.
    pub fn next_value(&self) -> CoreResult<f64> {
        let ratio = self.ratio.ok_or(CoreError::UnanalyzedPattern)?;
        let last = self.sequence.last().copied().ok_or(CoreError::UnanalyzedPattern)?;
        Ok(last * ratio)
    }

    /// Extrapolate `steps` values, multiplying forward by `r` each step.
    pub fn predict(&self, steps: usize) -> CoreResult<Vec<f64>> {
        let mut value = self.sequence.last().copied().ok_or(CoreError::UnanalyzedPattern)?;
        let ratio = self.ratio.ok_or(CoreError::UnanalyzedPattern)?;

        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            value *= ratio;
            out.push(value);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_progression() {
        let pattern = GeometricPattern::new(&[2.0, 6.0, 18.0, 54.0]);
        assert_eq!(pattern.confidence(), 1.0);
        assert_eq!(pattern.common_ratio(), Some(3.0));
        assert_eq!(pattern.next_value().unwrap(), 162.0);
    }

    #[test]
    fn test_fractional_ratio() {
        let pattern = GeometricPattern::new(&[1.0, 0.5, 0.25, 0.125]);
        assert!((pattern.next_value().unwrap() - 0.0625).abs() < 1e-9);
    }

    #[test]
    fn test_small_decimals() {
        let pattern = GeometricPattern::new(&[0.001, 0.0001, 0.00001]);
        assert_eq!(pattern.confidence(), 1.0);
    }

    #[test]
    fn test_negative_ratio_alternates_sign() {
        let pattern = GeometricPattern::new(&[1.0, -2.0, 4.0, -8.0]);
        assert_eq!(pattern.confidence(), 1.0);

        let predictions = pattern.predict(2).unwrap();
        assert_eq!(predictions, vec![16.0, -32.0]);
    }

    #[test]
    fn test_zero_term_is_inapplicable() {
        let pattern = GeometricPattern::new(&[0.0, 1.0, 2.0]);
        assert_eq!(pattern.confidence(), 0.0);

        let pattern = GeometricPattern::new(&[4.0, 0.0, 0.0]);
        assert_eq!(pattern.confidence(), 0.0);
    }

    #[test]
    fn test_inconsistent_ratio_rejected() {
        let pattern = GeometricPattern::new(&[1.0, 2.0, 4.0, 7.0]);
        assert_eq!(pattern.confidence(), 0.0);
    }

    #[test]
    fn test_unfitted_pattern_fails_loudly() {
        let pattern = GeometricPattern::default();
        assert!(matches!(
            pattern.next_value(),
            Err(CoreError::UnanalyzedPattern)
        ));
    }
}
