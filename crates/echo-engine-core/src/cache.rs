//! Bounded analysis cache keyed by sequence fingerprints.
//!
//! Eviction is by insertion order (FIFO), independent of access recency.
//! Overwriting an existing fingerprint keeps its original insertion slot.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::types::{Prediction, SequenceFingerprint};

/// Fingerprint-keyed cache of analysis results with a capacity bound.
#[derive(Debug)]
pub struct AnalysisCache {
    capacity: usize,
    entries: HashMap<SequenceFingerprint, Prediction>,
    order: VecDeque<SequenceFingerprint>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    /// Cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Store a result under the sequence's fingerprint.
    ///
    /// Evicts the least-recently-inserted entry when the bound is
    /// exceeded.
    pub fn set(&mut self, sequence: &[f64], prediction: Prediction) {
        let fingerprint = SequenceFingerprint::of(sequence);

        if self.entries.insert(fingerprint.clone(), prediction).is_some() {
            // Overwrite: insertion order unchanged
            return;
        }

        self.order.push_back(fingerprint);
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(fingerprint = %oldest, "evicted oldest cache entry");
            }
        }
    }

    /// Look up a sequence, counting the hit or miss.
    pub fn get(&mut self, sequence: &[f64]) -> Option<Prediction> {
        let fingerprint = SequenceFingerprint::of(sequence);
        match self.entries.get(&fingerprint) {
            Some(prediction) => {
                self.hits += 1;
                Some(prediction.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Hit/miss counters and occupancy.
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        };

        CacheStats {
            hits: self.hits,
            misses: self.misses,
            hit_rate,
            size: self.entries.len(),
            capacity: self.capacity,
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Cache counters at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// `hits / (hits + misses)`, 0.0 before any lookup.
    pub hit_rate: f64,
    /// Entries currently held.
    pub size: usize,
    /// Configured bound.
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PatternKind;

    fn prediction(next: f64) -> Prediction {
        Prediction {
            kind: PatternKind::Arithmetic,
            name: PatternKind::Arithmetic.display_name(),
            confidence: 1.0,
            parameters: vec![1.0],
            next_value: next,
            predictions: vec![next],
        }
    }

    #[test]
    fn test_round_trip_counts_hit() {
        let mut cache = AnalysisCache::new(8);
        cache.set(&[1.0, 2.0, 3.0, 4.0], prediction(5.0));

        let got = cache.get(&[1.0, 2.0, 3.0, 4.0]).expect("cached");
        assert_eq!(got.next_value, 5.0);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_miss_counts_and_returns_none() {
        let mut cache = AnalysisCache::new(8);
        assert!(cache.get(&[9.0, 9.0, 9.0]).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_equal_by_value_sequences_share_an_entry() {
        let mut cache = AnalysisCache::new(8);
        cache.set(&[1.0, 2.0, 3.0], prediction(4.0));

        // A separately constructed but equal sequence must hit
        let copy: Vec<f64> = [1.0, 2.0, 3.0].to_vec();
        assert!(cache.get(&copy).is_some());
    }

    #[test]
    fn test_fifo_evicts_exactly_the_first_inserted() {
        let capacity = 4;
        let mut cache = AnalysisCache::new(capacity);

        for i in 0..=capacity {
            cache.set(&[i as f64, i as f64 + 1.0], prediction(i as f64));
        }

        assert_eq!(cache.len(), capacity);
        assert!(cache.get(&[0.0, 1.0]).is_none(), "oldest entry evicted");
        for i in 1..=capacity {
            assert!(
                cache.get(&[i as f64, i as f64 + 1.0]).is_some(),
                "entry {} retained",
                i
            );
        }
    }

    #[test]
    fn test_overwrite_keeps_insertion_slot() {
        let mut cache = AnalysisCache::new(2);
        cache.set(&[1.0, 2.0], prediction(3.0));
        cache.set(&[2.0, 3.0], prediction(4.0));

        // Overwrite the oldest entry, then insert a new one: the
        // overwritten entry is still the eviction candidate.
        cache.set(&[1.0, 2.0], prediction(30.0));
        cache.set(&[3.0, 4.0], prediction(5.0));

        assert!(cache.get(&[1.0, 2.0]).is_none());
        assert!(cache.get(&[2.0, 3.0]).is_some());
        assert!(cache.get(&[3.0, 4.0]).is_some());
    }

    #[test]
    fn test_hit_rate_has_no_division_by_zero() {
        let cache = AnalysisCache::new(4);
        assert_eq!(cache.stats().hit_rate, 0.0);
    }

    #[test]
    fn test_clear_resets_counters() {
        let mut cache = AnalysisCache::new(4);
        cache.set(&[1.0, 2.0], prediction(3.0));
        cache.get(&[1.0, 2.0]);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 0);
    }
}
