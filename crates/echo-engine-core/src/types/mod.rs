//! Core domain types.

mod fingerprint;
mod history_record;
mod prediction;

pub use fingerprint::SequenceFingerprint;
pub use history_record::HistoryRecord;
pub use prediction::{PatternKind, PatternScore, Prediction};
