//! Append-only history of analyses with aggregate accuracy statistics.
//!
//! The in-memory record list is the source of truth; persistence is a
//! full snapshot written through a [`HistoryStore`] and is best-effort
//! relative to the prediction that produced the record. A store that
//! cannot be read at startup yields an empty history, never a fatal
//! error.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CoreResult;
use crate::types::HistoryRecord;

/// Durable storage for history snapshots.
///
/// Implementations acquire the underlying resource per call (open, write
/// the full snapshot, close); `save` replaces prior contents rather than
/// appending.
pub trait HistoryStore: Send + Sync {
    /// Read the last persisted snapshot. An absent snapshot is an empty
    /// list, not an error.
    fn load(&self) -> CoreResult<Vec<HistoryRecord>>;

    /// Replace the persisted snapshot with `records`.
    fn save(&self, records: &[HistoryRecord]) -> CoreResult<()>;
}

/// Process-wide record of past analyses and their accuracy.
pub struct HistoricalAnalyzer {
    records: Vec<HistoryRecord>,
    store: Option<Box<dyn HistoryStore>>,
}

impl HistoricalAnalyzer {
    /// History without persistence, for isolated instances.
    pub fn in_memory() -> Self {
        Self {
            records: Vec::new(),
            store: None,
        }
    }

    /// History backed by a store, loading whatever was persisted before.
    ///
    /// An unreadable store logs a warning and starts empty.
    pub fn with_store(store: Box<dyn HistoryStore>) -> Self {
        let records = match store.load() {
            Ok(records) => {
                debug!(count = records.len(), "loaded history snapshot");
                records
            }
            Err(err) => {
                warn!(error = %err, "history snapshot unreadable, starting empty");
                Vec::new()
            }
        };

        Self {
            records,
            store: Some(store),
        }
    }

    /// Append a record and schedule it for persistence.
    ///
    /// Persistence failures are logged and never propagate; the record
    /// is kept in memory regardless.
    pub fn add_record(&mut self, record: HistoryRecord) {
        self.records.push(record);

        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.records) {
                warn!(error = %err, "history persistence failed, keeping in-memory records");
            }
        }
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record is held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate statistics over every record.
    pub fn statistics(&self) -> HistoryStatistics {
        let total = self.records.len();
        if total == 0 {
            return HistoryStatistics {
                total_sequences: 0,
                success_rate: 0.0,
                average_confidence: 0.0,
                most_common_pattern: None,
            };
        }

        let successes = self
            .records
            .iter()
            .filter(|r| r.confidence >= 1.0)
            .count();
        let confidence_sum: f64 = self.records.iter().map(|r| r.confidence).sum();

        HistoryStatistics {
            total_sequences: total,
            success_rate: successes as f64 / total as f64,
            average_confidence: confidence_sum / total as f64,
            most_common_pattern: self.most_common_pattern(),
        }
    }

    // Highest occurrence count; ties go to the pattern seen first.
    fn most_common_pattern(&self) -> Option<String> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (index, record) in self.records.iter().enumerate() {
            let entry = counts.entry(record.pattern.as_str()).or_insert((0, index));
            entry.0 += 1;
        }

        counts
            .into_iter()
            .min_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                count_b.cmp(count_a).then(first_a.cmp(first_b))
            })
            .map(|(name, _)| name.to_string())
    }

    /// Records whose pattern name matches exactly.
    pub fn by_pattern(&self, name: &str) -> Vec<&HistoryRecord> {
        self.records.iter().filter(|r| r.pattern == name).collect()
    }

    /// Per-pattern record count and average confidence.
    pub fn accuracy_metrics(&self) -> BTreeMap<String, PatternAccuracy> {
        let mut sums: BTreeMap<String, (usize, f64)> = BTreeMap::new();
        for record in &self.records {
            let entry = sums.entry(record.pattern.clone()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += record.confidence;
        }

        sums.into_iter()
            .map(|(name, (count, sum))| {
                (
                    name,
                    PatternAccuracy {
                        count,
                        average_confidence: sum / count as f64,
                    },
                )
            })
            .collect()
    }

    /// Pattern counts across the most recent `window` records.
    pub fn trend_analysis(&self, window: usize) -> TrendAnalysis {
        let mut patterns: BTreeMap<String, usize> = BTreeMap::new();
        for record in self.records.iter().rev().take(window) {
            *patterns.entry(record.pattern.clone()).or_insert(0) += 1;
        }

        TrendAnalysis { window, patterns }
    }

    /// Drop every record, durably when a store is attached.
    pub fn clear_history(&mut self) {
        self.records.clear();
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.records) {
                warn!(error = %err, "failed to persist cleared history");
            }
        }
    }

    /// Write the full snapshot now, propagating any storage failure.
    pub fn persist_history(&self) -> CoreResult<()> {
        match &self.store {
            Some(store) => store.save(&self.records),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for HistoricalAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoricalAnalyzer")
            .field("records", &self.records.len())
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

/// Aggregate view over the whole history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatistics {
    /// Total records held.
    pub total_sequences: usize,
    /// Fraction of records with full confidence.
    pub success_rate: f64,
    /// Mean confidence across records.
    pub average_confidence: f64,
    /// Most frequently detected pattern, ties broken by first seen.
    pub most_common_pattern: Option<String>,
}

/// Per-pattern accuracy aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAccuracy {
    /// Records detected as this pattern.
    pub count: usize,
    /// Mean confidence of those records.
    pub average_confidence: f64,
}

/// Pattern counts inside a most-recent window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Requested window size.
    pub window: usize,
    /// Occurrences per pattern name within the window.
    pub patterns: BTreeMap<String, usize>,
}
