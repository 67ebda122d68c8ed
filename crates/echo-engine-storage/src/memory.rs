//! In-process store for isolated tests and ephemeral sessions.

use parking_lot::Mutex;

use echo_engine_core::{CoreResult, HistoryRecord, HistoryStore};

/// Keeps snapshots in memory; nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True when no snapshot has been written yet.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> CoreResult<Vec<HistoryRecord>> {
        Ok(self.records.lock().clone())
    }

    fn save(&self, records: &[HistoryRecord]) -> CoreResult<()> {
        *self.records.lock() = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trip() {
        let store = MemoryHistoryStore::new();
        let records = vec![HistoryRecord::new(
            vec![1.0, 2.0],
            "Arithmetic Progression",
            1.0,
            vec![3.0],
        )];

        store.save(&records).expect("save");
        assert_eq!(store.load().expect("load"), records);
        assert_eq!(store.len(), 1);
    }
}
