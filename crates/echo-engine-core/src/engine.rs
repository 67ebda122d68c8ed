//! Engine orchestration: validation, cache lookup, analysis, and
//! history recording.
//!
//! The cache and the historical analyzer are process-wide values shared
//! across sessions behind `parking_lot::RwLock` handles, constructed
//! once and passed explicitly rather than hidden in module state, so
//! tests build fresh isolated instances. Each [`Engine`] owns a private
//! [`SequenceAnalyzer`] for its session.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::analyzer::SequenceAnalyzer;
use crate::cache::{AnalysisCache, CacheStats};
use crate::config::EngineConfig;
use crate::error::CoreResult;
use crate::guard::SequenceGuard;
use crate::history::{HistoricalAnalyzer, HistoryStatistics, PatternAccuracy};
use crate::types::{HistoryRecord, PatternScore, Prediction};

/// Shared cache handle.
pub type SharedCache = Arc<RwLock<AnalysisCache>>;

/// Shared history handle.
pub type SharedHistory = Arc<RwLock<HistoricalAnalyzer>>;

/// One analysis outcome, with cache provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// The prediction itself.
    pub prediction: Prediction,
    /// True when the result was served from the shared cache.
    pub from_cache: bool,
}

/// Aggregate operator report: history, accuracy, and cache state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineReport {
    /// When the report was generated (UTC).
    pub generated_at: DateTime<Utc>,
    /// History-wide statistics.
    pub history: HistoryStatistics,
    /// Per-pattern accuracy aggregates.
    pub accuracy: BTreeMap<String, PatternAccuracy>,
    /// Shared cache counters.
    pub cache: CacheStats,
}

/// Session-scoped entry point for the full analysis flow.
pub struct Engine {
    guard: SequenceGuard,
    analyzer: SequenceAnalyzer,
    cache: SharedCache,
    history: SharedHistory,
    default_steps: usize,
}

impl Engine {
    /// Engine with fresh, isolated cache and in-memory history.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_shared(
            config,
            Arc::new(RwLock::new(AnalysisCache::new(config.cache_capacity))),
            Arc::new(RwLock::new(HistoricalAnalyzer::in_memory())),
        )
    }

    /// Engine sharing a process-wide cache and history with other
    /// sessions.
    pub fn with_shared(config: &EngineConfig, cache: SharedCache, history: SharedHistory) -> Self {
        Self {
            guard: SequenceGuard::with_config(config),
            analyzer: SequenceAnalyzer::with_config(config),
            cache,
            history,
            default_steps: config.default_steps,
        }
    }

    /// Analyze a sequence and extrapolate forward.
    ///
    /// Flow: validate, consult the shared cache (short-circuit on hit),
    /// otherwise detect and predict, store the result, and record it in
    /// the shared history. `steps` falls back to the configured default
    /// when unspecified.
    pub fn analyze(&mut self, sequence: &[f64], steps: Option<usize>) -> CoreResult<Analysis> {
        let report = self.guard.validate(sequence);
        if let Some(issue) = report.issue {
            return Err(issue.into_error());
        }

        if let Some(prediction) = self.cache.write().get(sequence) {
            debug!("analysis served from cache");
            return Ok(Analysis {
                prediction,
                from_cache: true,
            });
        }

        let steps = steps.unwrap_or(self.default_steps);
        let prediction = self.analyzer.predict(sequence, steps)?;

        self.cache.write().set(sequence, prediction.clone());
        self.history.write().add_record(HistoryRecord::new(
            sequence.to_vec(),
            prediction.name.clone(),
            prediction.confidence,
            prediction.predictions.clone(),
        ));

        Ok(Analysis {
            prediction,
            from_cache: false,
        })
    }

    /// Analyze several sequences, collecting per-sequence outcomes
    /// without aborting the batch.
    pub fn analyze_batch(
        &mut self,
        sequences: &[Vec<f64>],
        steps: Option<usize>,
    ) -> Vec<CoreResult<Analysis>> {
        sequences
            .iter()
            .map(|sequence| self.analyze(sequence, steps))
            .collect()
    }

    /// Per-hypothesis confidences for a sequence (diagnostic).
    pub fn all_patterns(&self, sequence: &[f64]) -> Vec<PatternScore> {
        self.analyzer.all_patterns(sequence)
    }

    /// This session's own prediction records.
    pub fn session_history(&self) -> &[HistoryRecord] {
        self.analyzer.history()
    }

    /// Drop this session's records; other sessions are unaffected.
    pub fn clear_session_history(&mut self) {
        self.analyzer.clear_history();
    }

    /// Shared cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.read().stats()
    }

    /// Handle to the shared history, for operator paths.
    pub fn history_handle(&self) -> SharedHistory {
        Arc::clone(&self.history)
    }

    /// Aggregate report over shared history and cache.
    pub fn report(&self) -> EngineReport {
        let history = self.history.read();
        EngineReport {
            generated_at: Utc::now(),
            history: history.statistics(),
            accuracy: history.accuracy_metrics(),
            cache: self.cache.read().stats(),
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("default_steps", &self.default_steps)
            .field("session_records", &self.analyzer.history().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_analyze_full_flow() {
        let mut engine = Engine::new(&EngineConfig::default());
        let analysis = engine.analyze(&[3.0, 6.0, 9.0, 12.0], None).unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(analysis.prediction.next_value, 15.0);
        assert_eq!(analysis.prediction.predictions.len(), 5);
        assert_eq!(engine.session_history().len(), 1);
        assert_eq!(engine.history_handle().read().len(), 1);
    }

    #[test]
    fn test_second_analysis_hits_cache() {
        let mut engine = Engine::new(&EngineConfig::default());
        engine.analyze(&[2.0, 4.0, 8.0], None).unwrap();

        let again = engine.analyze(&[2.0, 4.0, 8.0], None).unwrap();
        assert!(again.from_cache);

        let stats = engine.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);

        // Cache hits do not grow the shared history
        assert_eq!(engine.history_handle().read().len(), 1);
    }

    #[test]
    fn test_invalid_input_aborts_before_analysis() {
        let mut engine = Engine::new(&EngineConfig::default());
        let err = engine.analyze(&[1.0, f64::NAN, 3.0], None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { position: 1, .. }));
        assert!(engine.session_history().is_empty());
    }

    #[test]
    fn test_oversized_input_rejected() {
        let config = EngineConfig {
            max_sequence_len: 4,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(&config);

        let err = engine.analyze(&[1.0; 5], None).unwrap_err();
        assert!(matches!(err, CoreError::SequenceTooLong { len: 5, max: 4 }));
    }

    #[test]
    fn test_batch_collects_failures_without_aborting() {
        let mut engine = Engine::new(&EngineConfig::default());
        let outcomes = engine.analyze_batch(
            &[
                vec![1.0, 2.0, 3.0],
                vec![5.0],
                vec![2.0, 6.0, 18.0],
            ],
            Some(2),
        );

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(matches!(
            outcomes[1],
            Err(CoreError::InsufficientData { len: 1 })
        ));
        assert!(outcomes[2].is_ok());
    }

    #[test]
    fn test_sessions_share_cache_but_not_session_history() {
        let config = EngineConfig::default();
        let cache: SharedCache = Arc::new(RwLock::new(AnalysisCache::new(16)));
        let history: SharedHistory = Arc::new(RwLock::new(HistoricalAnalyzer::in_memory()));

        let mut first = Engine::with_shared(&config, Arc::clone(&cache), Arc::clone(&history));
        let mut second = Engine::with_shared(&config, Arc::clone(&cache), Arc::clone(&history));

        first.analyze(&[1.0, 2.0, 3.0], None).unwrap();
        let analysis = second.analyze(&[1.0, 2.0, 3.0], None).unwrap();

        assert!(analysis.from_cache);
        assert_eq!(first.session_history().len(), 1);
        assert!(second.session_history().is_empty());
        assert_eq!(history.read().len(), 1);
    }

    #[test]
    fn test_report_aggregates_history_and_cache() {
        let mut engine = Engine::new(&EngineConfig::default());
        engine.analyze(&[1.0, 2.0, 3.0], None).unwrap();
        engine.analyze(&[2.0, 6.0, 18.0], None).unwrap();

        let report = engine.report();
        assert_eq!(report.history.total_sequences, 2);
        assert_eq!(report.accuracy.len(), 2);
        assert_eq!(report.cache.misses, 2);
    }
}
