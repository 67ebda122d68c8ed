//! Echo Engine Core Library
//!
//! Classifies finite numeric sequences into generative patterns
//! (arithmetic, geometric, or polynomial progressions), extrapolates
//! future terms, and tracks the performance and historical accuracy of
//! doing so.
//!
//! # Architecture
//!
//! This crate defines:
//! - Pattern hypotheses (`ArithmeticPattern`, `GeometricPattern`,
//!   `PolynomialPattern`) unified behind [`patterns::PatternModel`]
//! - The [`analyzer::SequenceAnalyzer`] that picks the best hypothesis
//!   and produces multi-step predictions
//! - A bounded, fingerprint-keyed [`cache::AnalysisCache`]
//! - The [`guard::SequenceGuard`] input validator and downsampler
//! - Performance instrumentation ([`perf::PerformanceAnalyzer`],
//!   [`perf::BenchmarkRunner`])
//! - The append-only [`history::HistoricalAnalyzer`] with pluggable
//!   persistence via [`history::HistoryStore`]
//! - The [`engine::Engine`] that wires guard, cache, analyzer, and
//!   history into the full analysis flow
//!
//! # Example
//!
//! ```
//! use echo_engine_core::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(&EngineConfig::default());
//! let analysis = engine.analyze(&[3.0, 6.0, 9.0, 12.0], None).unwrap();
//! assert_eq!(analysis.prediction.next_value, 15.0);
//! ```

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod guard;
pub mod history;
pub mod patterns;
pub mod perf;
pub mod types;

// Re-exports for convenience
pub use analyzer::SequenceAnalyzer;
pub use cache::{AnalysisCache, CacheStats};
pub use config::EngineConfig;
pub use engine::{Analysis, Engine};
pub use error::{CoreError, CoreResult};
pub use guard::SequenceGuard;
pub use history::{HistoricalAnalyzer, HistoryStore};
pub use types::{HistoryRecord, PatternKind, Prediction, SequenceFingerprint};
