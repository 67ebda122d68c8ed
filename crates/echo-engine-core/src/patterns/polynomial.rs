//! Polynomial hypothesis via the finite-difference method.
//!
//! A sequence is polynomial of degree `k` iff its `k`-th difference is
//! constant. Fitting builds the difference table once; extrapolation
//! extends the constant top-order difference back down through each
//! level, folding every produced value into the table state.

use super::values_match;
use crate::error::{CoreError, CoreResult};

/// Polynomial progression fit of a fixed degree.
///
/// Requires `sequence.len() >= degree + 2` so the final difference row
/// holds at least two values to compare; shorter input makes the
/// hypothesis inapplicable (confidence 0.0).
#[derive(Debug, Clone, Default)]
pub struct PolynomialPattern {
    sequence: Vec<f64>,
    degree: usize,
    // Last value of each difference level 0..=degree, present only when
    // the fit succeeded. tail[degree] is the constant top difference.
    tail: Option<Vec<f64>>,
}

impl PolynomialPattern {
    /// Fit a degree-`degree` hypothesis to a sequence.
    pub fn new(sequence: &[f64], degree: usize) -> Self {
        Self {
            sequence: sequence.to_vec(),
            degree,
            tail: Self::fit(sequence, degree),
        }
    }

    fn fit(sequence: &[f64], degree: usize) -> Option<Vec<f64>> {
        // Two values at the final difference order
        if sequence.len() < degree + 2 {
            return None;
        }

        let mut tail = Vec::with_capacity(degree + 1);
        let mut row = sequence.to_vec();
        tail.push(*row.last()?);

        for _ in 0..degree {
            row = row.windows(2).map(|pair| pair[1] - pair[0]).collect();
            tail.push(*row.last()?);
        }

        // The top-order row must be constant within tolerance
        let top = *row.last()?;
        let constant = row.iter().all(|&d| values_match(d, top));

        constant.then_some(tail)
    }

    /// Degree of this hypothesis.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Confidence of the fit: 1.0 when the top difference row is
    /// constant, else 0.0.
    #[inline]
    pub fn confidence(&self) -> f64 {
        if self.tail.is_some() { 1.0 } else { 0.0 }
    }

    /// Fitted parameters: `[c]`, the constant top-order difference.
    pub fn parameters(&self) -> Vec<f64> {
        match &self.tail {
            Some(tail) => tail.last().copied().into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// The single next extrapolated value.
    pub fn next_value(&self) -> CoreResult<f64> {
        let tail = self.tail.as_ref().ok_or(CoreError::UnanalyzedPattern)?;
        // One extension step: the next value at level 0 is the sum of the
        // current last value at every level.
        Ok(tail.iter().sum())
    }

    /// Extrapolate `steps` values forward.
    pub fn predict(&self, steps: usize) -> CoreResult<Vec<f64>> {
        let mut tail = self.tail.clone().ok_or(CoreError::UnanalyzedPattern)?;

        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            // Extend each level from the top down; tail[degree] stays
            // constant. After the sweep tail[0] is the new value.
            for level in (0..self.degree).rev() {
                tail[level] += tail[level + 1];
            }
            out.push(tail[0]);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_squares() {
        let pattern = PolynomialPattern::new(&[1.0, 4.0, 9.0, 16.0], 2);
        assert_eq!(pattern.confidence(), 1.0);
        assert_eq!(pattern.next_value().unwrap(), 25.0);
    }

    #[test]
    fn test_squares_from_zero() {
        let pattern = PolynomialPattern::new(&[0.0, 1.0, 4.0, 9.0], 2);
        assert_eq!(pattern.next_value().unwrap(), 16.0);
    }

    #[test]
    fn test_perfect_cubes() {
        let pattern = PolynomialPattern::new(&[1.0, 8.0, 27.0, 64.0, 125.0], 3);
        assert_eq!(pattern.confidence(), 1.0);
        assert_eq!(pattern.next_value().unwrap(), 216.0);
    }

    #[test]
    fn test_multi_step_squares() {
        let pattern = PolynomialPattern::new(&[1.0, 4.0, 9.0, 16.0], 2);
        let predictions = pattern.predict(3).unwrap();
        assert_eq!(predictions, vec![25.0, 36.0, 49.0]);
    }

    #[test]
    fn test_too_short_for_degree_is_inapplicable() {
        // Degree 2 needs at least 4 values
        let pattern = PolynomialPattern::new(&[1.0, 4.0, 9.0], 2);
        assert_eq!(pattern.confidence(), 0.0);
    }

    #[test]
    fn test_non_polynomial_rejected() {
        let pattern = PolynomialPattern::new(&[1.0, 2.0, 4.0, 8.0, 16.0], 2);
        assert_eq!(pattern.confidence(), 0.0);
    }

    #[test]
    fn test_wrong_degree_rejected() {
        // Squares are degree 2; their first difference row 3,5,7 is not
        // constant, so a degree-1 fit must fail.
        let pattern = PolynomialPattern::new(&[1.0, 4.0, 9.0, 16.0], 1);
        assert_eq!(pattern.confidence(), 0.0);
    }

    #[test]
    fn test_degree_zero_is_constant_sequence() {
        let pattern = PolynomialPattern::new(&[7.0, 7.0, 7.0], 0);
        assert_eq!(pattern.confidence(), 1.0);
        assert_eq!(pattern.next_value().unwrap(), 7.0);
        assert_eq!(pattern.predict(2).unwrap(), vec![7.0, 7.0]);
    }

    #[test]
    fn test_unfitted_pattern_fails_loudly() {
        let pattern = PolynomialPattern::default();
        assert!(matches!(
            pattern.predict(1),
            Err(CoreError::UnanalyzedPattern)
        ));
    }
}
