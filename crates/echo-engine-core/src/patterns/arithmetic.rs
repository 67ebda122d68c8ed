//! Constant-difference (arithmetic progression) hypothesis.

use super::values_match;
use crate::error::{CoreError, CoreResult};

/// Arithmetic progression fit: `seq[i+1] = seq[i] + d`.
///
/// The common difference is taken from the first pair and verified
/// against every consecutive pair within tolerance. A default-constructed
/// instance has seen no sequence; querying it fails with
/// [`CoreError::UnanalyzedPattern`].
#[derive(Debug, Clone, Default)]
pub struct ArithmeticPattern {
    sequence: Vec<f64>,
    difference: Option<f64>,
}

impl ArithmeticPattern {
    /// Fit the hypothesis to a sequence.
    pub fn new(sequence: &[f64]) -> Self {
        Self {
            sequence: sequence.to_vec(),
            difference: Self::fit(sequence),
        }
    }

    fn fit(sequence: &[f64]) -> Option<f64> {
        if sequence.len() < 2 {
            return None;
        }

        let difference = sequence[1] - sequence[0];
        let consistent = sequence
            .windows(2)
            .all(|pair| values_match(pair[1] - pair[0], difference));

        consistent.then_some(difference)
    }

    /// Confidence of the fit: 1.0 when every pair matches, else 0.0.
    #[inline]
    pub fn confidence(&self) -> f64 {
        if self.difference.is_some() { 1.0 } else { 0.0 }
    }

    /// The common difference, when the fit succeeded.
    #[inline]
    pub fn common_difference(&self) -> Option<f64> {
        self.difference
    }

    /// Fitted parameters: `[d]`.
    pub fn parameters(&self) -> Vec<f64> {
        self.difference.into_iter().collect()
    }

    /// Next value: `seq[last] + d`.
    pub fn next_value(&self) -> CoreResult<f64> {
        let difference = self.difference.ok_or(CoreError::UnanalyzedPattern)?;
        let last = self.sequence.last().copied().ok_or(CoreError::UnanalyzedPattern)?;
        Ok(last + difference)
    }

    /// Extrapolate `steps` values: `last + d, last + 2d, ...`.
    pub fn predict(&self, steps: usize) -> CoreResult<Vec<f64>> {
        let mut value = self.sequence.last().copied().ok_or(CoreError::UnanalyzedPattern)?;
        let difference = self.difference.ok_or(CoreError::UnanalyzedPattern)?;

        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            value += difference;
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
        let pattern = ArithmeticPattern::new(&[2.0, 5.0, 8.0, 11.0]);
        assert_eq!(pattern.confidence(), 1.0);
        assert_eq!(pattern.common_difference(), Some(3.0));
        assert_eq!(pattern.next_value().unwrap(), 14.0);
    }

    #[test]
    fn test_negative_progression() {
        let pattern = ArithmeticPattern::new(&[10.0, 5.0, 0.0, -5.0]);
        assert_eq!(pattern.next_value().unwrap(), -10.0);
    }

    #[test]
    fn test_decimal_progression() {
        let pattern = ArithmeticPattern::new(&[0.5, 1.0, 1.5, 2.0]);
        assert!((pattern.next_value().unwrap() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_two_element_sequence_fits() {
        let pattern = ArithmeticPattern::new(&[1.0, 2.0]);
        assert_eq!(pattern.confidence(), 1.0);
        assert_eq!(pattern.next_value().unwrap(), 3.0);
    }

    #[test]
    fn test_constant_sequence_has_zero_difference() {
        let pattern = ArithmeticPattern::new(&[5.0, 5.0, 5.0, 5.0]);
        assert_eq!(pattern.common_difference(), Some(0.0));
        assert_eq!(pattern.next_value().unwrap(), 5.0);
    }

    #[test]
    fn test_inconsistent_difference_rejected() {
        let pattern = ArithmeticPattern::new(&[1.0, 2.0, 4.0, 7.0]);
        assert_eq!(pattern.confidence(), 0.0);
        assert!(matches!(
            pattern.next_value(),
            Err(CoreError::UnanalyzedPattern)
        ));
    }

    #[test]
    fn test_multi_step_prediction() {
        let pattern = ArithmeticPattern::new(&[2.0, 5.0, 8.0, 11.0]);
        let predictions = pattern.predict(3).unwrap();
        assert_eq!(predictions, vec![14.0, 17.0, 20.0]);
    }

    #[test]
    fn test_unfitted_pattern_fails_loudly() {
        let pattern = ArithmeticPattern::default();
        assert_eq!(pattern.confidence(), 0.0);
        assert!(matches!(
            pattern.predict(1),
            Err(CoreError::UnanalyzedPattern)
        ));
    }

    #[test]
    fn test_large_magnitude_values_fit() {
        let base = 1e15;
        let pattern = ArithmeticPattern::new(&[base, base + 1e6, base + 2e6, base + 3e6]);
        assert_eq!(pattern.confidence(), 1.0);
        assert_eq!(pattern.next_value().unwrap(), base + 4e6);
    }
}
