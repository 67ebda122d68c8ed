//! Sequence analysis: hypothesis evaluation, winner selection, and
//! multi-step prediction.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{CoreError, CoreResult};
use crate::patterns::{ArithmeticPattern, GeometricPattern, PatternModel, PolynomialPattern};
use crate::types::{HistoryRecord, PatternScore, Prediction};

/// Picks the single best explanation for a sequence and produces forward
/// predictions.
///
/// Hypotheses are evaluated in a fixed priority order (arithmetic,
/// geometric, then polynomial from degree 2 upward) and the first one
/// reaching full confidence wins. Simplicity-first tie-breaking, not a
/// global best-fit search.
///
/// Each analyzer instance keeps its own history of successful
/// predictions; instances never observe each other's history.
#[derive(Debug)]
pub struct SequenceAnalyzer {
    max_degree: usize,
    history: Vec<HistoryRecord>,
    last_detected: Option<PatternModel>,
}

impl SequenceAnalyzer {
    /// Analyzer with default limits.
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Analyzer with configured limits.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            max_degree: config.max_degree,
            history: Vec::new(),
            last_detected: None,
        }
    }

    /// Detect the winning pattern for a sequence.
    ///
    /// Sequences shorter than 2 are rejected with
    /// [`CoreError::InsufficientData`]. A well-formed sequence no
    /// hypothesis explains yields [`CoreError::UnrecognizedPattern`],
    /// a normal no-match branch for callers, not a fatal failure.
    pub fn detect(&mut self, sequence: &[f64]) -> CoreResult<PatternModel> {
        if sequence.len() < 2 {
            return Err(CoreError::InsufficientData {
                len: sequence.len(),
            });
        }

        let winner = self.evaluate(sequence).into_iter().find(|model| {
            model.confidence() >= 1.0
        });

        match winner {
            Some(model) => {
                debug!(pattern = %model.name(), "pattern detected");
                self.last_detected = Some(model.clone());
                Ok(model)
            }
            None => Err(CoreError::UnrecognizedPattern),
        }
    }

    /// Detect, then extrapolate `steps` values with the winner.
    ///
    /// Every successful call appends a record to this instance's history.
    pub fn predict(&mut self, sequence: &[f64], steps: usize) -> CoreResult<Prediction> {
        let model = self.detect(sequence)?;

        let prediction = Prediction {
            kind: model.kind(),
            name: model.name(),
            confidence: model.confidence(),
            parameters: model.parameters(),
            next_value: model.next_value()?,
            predictions: model.predict(steps)?,
        };

        self.history.push(HistoryRecord::new(
            sequence.to_vec(),
            prediction.name.clone(),
            prediction.confidence,
            prediction.predictions.clone(),
        ));

        Ok(prediction)
    }

    /// Confidence each hypothesis achieved, in evaluation order.
    ///
    /// Introspection aid; winner selection never consults this.
    pub fn all_patterns(&self, sequence: &[f64]) -> Vec<PatternScore> {
        self.evaluate(sequence)
            .iter()
            .map(|model| PatternScore {
                kind: model.kind(),
                name: model.name(),
                confidence: model.confidence(),
            })
            .collect()
    }

    fn evaluate(&self, sequence: &[f64]) -> Vec<PatternModel> {
        let mut models = vec![
            PatternModel::Arithmetic(ArithmeticPattern::new(sequence)),
            PatternModel::Geometric(GeometricPattern::new(sequence)),
        ];

        // Polynomial degrees are bounded by both the configured maximum
        // and the sequence length (degree + 2 values needed).
        if sequence.len() >= 4 {
            let top = self.max_degree.min(sequence.len() - 2);
            for degree in 2..=top {
                models.push(PatternModel::Polynomial(PolynomialPattern::new(
                    sequence, degree,
                )));
            }
        }

        models
    }

    /// The most recently detected pattern, if any.
    pub fn last_detected(&self) -> Option<&PatternModel> {
        self.last_detected.as_ref()
    }

    /// Records of this instance's successful predictions, oldest first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Drop this instance's history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for SequenceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
