//! Performance instrumentation: wall-clock measurement and
//! micro-benchmarking of engine operations.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One timed execution of a named operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSample {
    /// Operation label.
    pub operation: String,
    /// Measured wall-clock duration.
    pub duration: Duration,
    /// When the sample was taken (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Distributional summary of a set of duration samples.
///
/// Percentiles are exact nearest-rank over the sorted sample set; no
/// interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationStats {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: Duration,
    /// Fastest sample.
    pub min: Duration,
    /// Slowest sample.
    pub max: Duration,
    /// 95th percentile.
    pub p95: Duration,
    /// 99th percentile.
    pub p99: Duration,
}

impl DurationStats {
    const ZERO: Self = Self {
        count: 0,
        mean: Duration::ZERO,
        min: Duration::ZERO,
        max: Duration::ZERO,
        p95: Duration::ZERO,
        p99: Duration::ZERO,
    };

    fn from_durations(durations: &[Duration]) -> Self {
        if durations.is_empty() {
            return Self::ZERO;
        }

        let mut sorted = durations.to_vec();
        sorted.sort_unstable();

        let total: Duration = sorted.iter().sum();
        Self {
            count: sorted.len(),
            mean: total / sorted.len() as u32,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p95: nearest_rank(&sorted, 95.0),
            p99: nearest_rank(&sorted, 99.0),
        }
    }
}

fn nearest_rank(sorted: &[Duration], percentile: f64) -> Duration {
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Records individual operation timings and aggregates them on demand.
///
/// Raw samples are retained for the analyzer's lifetime.
#[derive(Debug, Default)]
pub struct PerformanceAnalyzer {
    samples: Vec<BenchmarkSample>,
}

impl PerformanceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` once, recording its wall-clock duration.
    ///
    /// Returns the operation's own result alongside the measured time.
    pub fn measure_execution<T>(
        &mut self,
        operation: impl Into<String>,
        op: impl FnOnce() -> T,
    ) -> (T, Duration) {
        let start = Instant::now();
        let result = op();
        let duration = start.elapsed();

        self.samples.push(BenchmarkSample {
            operation: operation.into(),
            duration,
            timestamp: Utc::now(),
        });

        (result, duration)
    }

    /// Aggregate every recorded sample.
    pub fn statistics(&self) -> DurationStats {
        let durations: Vec<Duration> = self.samples.iter().map(|s| s.duration).collect();
        DurationStats::from_durations(&durations)
    }

    /// The raw samples, in recording order.
    pub fn samples(&self) -> &[BenchmarkSample] {
        &self.samples
    }
}

/// Aggregated outcome of one benchmark run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    /// Benchmark label.
    pub name: String,
    /// Number of timed iterations.
    pub iterations: usize,
    /// Mean iteration duration.
    pub average: Duration,
    /// Fastest iteration.
    pub min: Duration,
    /// Slowest iteration.
    pub max: Duration,
    /// 95th percentile iteration.
    pub p95: Duration,
    /// 99th percentile iteration.
    pub p99: Duration,
}

/// Outcome of a two-way benchmark comparison.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    /// Name of the benchmark with the lower average.
    pub winner: String,
    /// How much faster the winner's average was, in percent of the
    /// loser's average.
    pub improvement_percent: f64,
    /// Full report for the first candidate.
    pub first: BenchmarkReport,
    /// Full report for the second candidate.
    pub second: BenchmarkReport,
}

/// Runs operations repeatedly and keeps every report, in run order.
#[derive(Debug, Default)]
pub struct BenchmarkRunner {
    results: Vec<BenchmarkReport>,
}

impl BenchmarkRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute `op` `iterations` times, discarding its return value, and
    /// aggregate the per-iteration timings.
    pub fn run(
        &mut self,
        name: impl Into<String>,
        mut op: impl FnMut(),
        iterations: usize,
    ) -> BenchmarkReport {
        let mut durations = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            let start = Instant::now();
            op();
            durations.push(start.elapsed());
        }

        let stats = DurationStats::from_durations(&durations);
        let report = BenchmarkReport {
            name: name.into(),
            iterations,
            average: stats.mean,
            min: stats.min,
            max: stats.max,
            p95: stats.p95,
            p99: stats.p99,
        };

        self.results.push(report.clone());
        report
    }

    /// Run both candidates and report which one averaged lower, with the
    /// relative improvement percentage.
    pub fn compare(
        &mut self,
        name_a: impl Into<String>,
        op_a: impl FnMut(),
        name_b: impl Into<String>,
        op_b: impl FnMut(),
        iterations: usize,
    ) -> BenchmarkComparison {
        let first = self.run(name_a, op_a, iterations);
        let second = self.run(name_b, op_b, iterations);

        let (winner, faster, slower) = if first.average <= second.average {
            (first.name.clone(), first.average, second.average)
        } else {
            (second.name.clone(), second.average, first.average)
        };

        let improvement_percent = if slower.is_zero() {
            0.0
        } else {
            (slower - faster).as_secs_f64() / slower.as_secs_f64() * 100.0
        };

        BenchmarkComparison {
            winner,
            improvement_percent,
            first,
            second,
        }
    }

    /// Every benchmark run so far, in run order.
    pub fn results(&self) -> &[BenchmarkReport] {
        &self.results
    }
}
