//! Command handlers: parse input, drive the engine, print results.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Subcommand;
use parking_lot::RwLock;
use tracing::info;

use echo_engine_core::analyzer::SequenceAnalyzer;
use echo_engine_core::guard::SequenceGuard;
use echo_engine_core::perf::BenchmarkRunner;
use echo_engine_core::{
    Analysis, AnalysisCache, Engine, EngineConfig, HistoricalAnalyzer, SequenceFingerprint,
};
use echo_engine_storage::JsonHistoryStore;

/// Demonstration sequences covering every supported pattern family.
const DEMO_SEQUENCES: [&[f64]; 6] = [
    &[3.0, 6.0, 9.0, 12.0],
    &[2.0, 6.0, 18.0, 54.0],
    &[1.0, 4.0, 9.0, 16.0],
    &[1.0, 8.0, 27.0, 64.0, 125.0],
    &[5.0, 5.0, 5.0, 5.0],
    &[100.0, 95.0, 90.0, 85.0],
];

const DEFAULT_HISTORY_PATH: &str = "data/history.json";

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print persisted records, optionally filtered by pattern name
    Show {
        /// Exact pattern name to filter by
        #[arg(long)]
        pattern: Option<String>,

        /// Also show pattern counts over the most recent N records
        #[arg(long)]
        trend: Option<usize>,
    },
    /// Drop all persisted records
    Clear,
}

/// Parse a comma-separated number list into a sequence.
///
/// Reports the position and text of the first element that does not
/// parse, per the engine's invalid-input contract.
fn parse_sequence(input: &str) -> anyhow::Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(position, item)| {
            item.parse::<f64>()
                .with_context(|| format!("element {} ({:?}) is not a number", position, item))
        })
        .collect()
}

fn build_engine(config: &EngineConfig) -> Engine {
    let path = config
        .history_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH));
    info!(path = %path.display(), "using history snapshot");

    let store = JsonHistoryStore::new(path);
    let cache = Arc::new(RwLock::new(AnalysisCache::new(config.cache_capacity)));
    let history = Arc::new(RwLock::new(HistoricalAnalyzer::with_store(Box::new(store))));
    Engine::with_shared(config, cache, history)
}

fn print_analysis(sequence: &[f64], analysis: &Analysis) {
    let prediction = &analysis.prediction;
    println!("Sequence:    {:?}", sequence);
    println!("Pattern:     {}", prediction.name);
    println!("Confidence:  {:.1}", prediction.confidence);
    println!("Parameters:  {:?}", prediction.parameters);
    println!("Next value:  {}", prediction.next_value);
    println!("Predictions: {:?}", prediction.predictions);
    if analysis.from_cache {
        println!("Source:      cache");
    }
}

pub fn predict(
    config: &EngineConfig,
    input: &str,
    steps: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let sequence = parse_sequence(input)?;
    let mut engine = build_engine(config);

    let analysis = engine.analyze(&sequence, steps)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&sequence, &analysis);
    }
    Ok(())
}

pub fn batch(
    config: &EngineConfig,
    inputs: &[String],
    steps: Option<usize>,
) -> anyhow::Result<()> {
    let mut engine = build_engine(config);
    let mut successful = 0usize;

    for input in inputs {
        let sequence = match parse_sequence(input) {
            Ok(sequence) => sequence,
            Err(err) => {
                println!("{:<28} parse error: {:#}", input, err);
                continue;
            }
        };

        match engine.analyze(&sequence, steps) {
            Ok(analysis) => {
                successful += 1;
                println!(
                    "{:<28} {} -> {}",
                    input, analysis.prediction.name, analysis.prediction.next_value
                );
            }
            Err(err) => println!("{:<28} {}", input, err),
        }
    }

    println!("{} of {} sequences analyzed", successful, inputs.len());
    Ok(())
}

pub fn demo(config: &EngineConfig) -> anyhow::Result<()> {
    let mut engine = build_engine(config);

    for sequence in DEMO_SEQUENCES {
        match engine.analyze(sequence, Some(3)) {
            Ok(analysis) => {
                println!(
                    "{:?} -> {} (next: {})",
                    sequence, analysis.prediction.name, analysis.prediction.next_value
                );
            }
            Err(err) => println!("{:?} -> {}", sequence, err),
        }
    }

    let scores = engine.all_patterns(DEMO_SEQUENCES[0]);
    println!();
    println!("Hypothesis confidences for {:?}:", DEMO_SEQUENCES[0]);
    for score in scores {
        println!("  {:<24} {:.1}", score.name, score.confidence);
    }
    Ok(())
}

pub fn history(config: &EngineConfig, action: HistoryAction) -> anyhow::Result<()> {
    let engine = build_engine(config);
    let history = engine.history_handle();

    match action {
        HistoryAction::Show { pattern, trend } => {
            let history = history.read();
            let records: Vec<_> = match &pattern {
                Some(name) => history.by_pattern(name),
                None => history.records().iter().collect(),
            };

            if records.is_empty() {
                println!("No history records.");
            }
            for record in &records {
                println!(
                    "[{}] {:<24} {:?} -> {:?} (fingerprint {})",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.pattern,
                    record.sequence,
                    record.predictions,
                    SequenceFingerprint::of(&record.sequence),
                );
            }

            if let Some(window) = trend {
                let trends = history.trend_analysis(window);
                println!();
                println!("Patterns over the last {} records:", trends.window);
                for (name, count) in &trends.patterns {
                    println!("  {:<24} {}", name, count);
                }
            }
        }
        HistoryAction::Clear => {
            let count = {
                let mut history = history.write();
                let count = history.len();
                history.clear_history();
                count
            };
            println!("Cleared {} history records.", count);
        }
    }
    Ok(())
}

pub fn stats(config: &EngineConfig, json: bool) -> anyhow::Result<()> {
    let engine = build_engine(config);
    let report = engine.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Analyzed sequences:   {}", report.history.total_sequences);
    println!("Success rate:         {:.1}%", report.history.success_rate * 100.0);
    println!("Average confidence:   {:.2}", report.history.average_confidence);
    if let Some(pattern) = &report.history.most_common_pattern {
        println!("Most common pattern:  {}", pattern);
    }
    println!();
    println!("Per-pattern accuracy:");
    for (name, accuracy) in &report.accuracy {
        println!(
            "  {:<24} count {:<5} avg confidence {:.2}",
            name, accuracy.count, accuracy.average_confidence
        );
    }
    println!();
    println!(
        "Cache: {} hits / {} misses (rate {:.2}), {} of {} entries",
        report.cache.hits,
        report.cache.misses,
        report.cache.hit_rate,
        report.cache.size,
        report.cache.capacity
    );
    Ok(())
}

pub fn bench(iterations: usize) -> anyhow::Result<()> {
    if iterations == 0 {
        bail!("iterations must be at least 1");
    }

    let arithmetic = [1.0, 2.0, 3.0, 4.0, 5.0];
    let geometric = [2.0, 4.0, 8.0, 16.0, 32.0];
    let polynomial = [1.0, 4.0, 9.0, 16.0, 25.0];
    let large: Vec<f64> = (1..=10_000).map(|i| i as f64).collect();

    let mut runner = BenchmarkRunner::new();

    runner.run(
        "arithmetic detection",
        || {
            let mut analyzer = SequenceAnalyzer::new();
            let _ = analyzer.detect(&arithmetic);
        },
        iterations,
    );
    runner.run(
        "geometric detection",
        || {
            let mut analyzer = SequenceAnalyzer::new();
            let _ = analyzer.detect(&geometric);
        },
        iterations,
    );
    runner.run(
        "polynomial detection",
        || {
            let mut analyzer = SequenceAnalyzer::new();
            let _ = analyzer.detect(&polynomial);
        },
        iterations,
    );

    let mut analyzer = SequenceAnalyzer::new();
    runner.run(
        "5-step prediction",
        || {
            let _ = analyzer.predict(&arithmetic, 5);
        },
        iterations,
    );

    let guard = SequenceGuard::default();
    runner.run(
        "validation (10k)",
        || {
            let _ = guard.validate(&large);
        },
        iterations.min(100),
    );
    runner.run(
        "downsampling (10k -> 1k)",
        || {
            let _ = SequenceGuard::downsample(&large, 10);
        },
        iterations.min(100),
    );

    let comparison = runner.compare(
        "first analysis",
        || {
            let mut analyzer = SequenceAnalyzer::new();
            let _ = analyzer.detect(&arithmetic);
        },
        "repeated analysis",
        || {
            let mut analyzer = SequenceAnalyzer::new();
            let _ = analyzer.detect(&arithmetic);
        },
        iterations,
    );

    println!("{:<28} {:>10} {:>12} {:>12} {:>12}", "benchmark", "iters", "avg", "p95", "p99");
    for report in runner.results() {
        println!(
            "{:<28} {:>10} {:>12?} {:>12?} {:>12?}",
            report.name, report.iterations, report.average, report.p95, report.p99
        );
    }
    println!();
    println!(
        "Winner: {} ({:.1}% faster)",
        comparison.winner, comparison.improvement_percent
    );
    Ok(())
}
