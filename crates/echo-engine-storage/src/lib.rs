//! Echo Engine Storage
//!
//! Durable persistence backends for the historical analyzer:
//! - [`JsonHistoryStore`]: an operator-readable JSON snapshot on disk
//! - [`MemoryHistoryStore`]: an in-process store for isolated tests
//!
//! Both implement `echo_engine_core::HistoryStore`. Every persist call
//! acquires the backing resource, writes the full snapshot, and releases
//! it, so a failed write never leaves the in-memory record list
//! inconsistent.

pub mod error;
mod json_store;
mod memory;

pub use error::StorageError;
pub use json_store::JsonHistoryStore;
pub use memory::MemoryHistoryStore;
