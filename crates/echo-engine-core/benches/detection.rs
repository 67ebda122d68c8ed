//! Detection and prediction benchmarks.
//!
//! Run: cargo bench -p echo-engine-core -- detection

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use echo_engine_core::analyzer::SequenceAnalyzer;
use echo_engine_core::cache::AnalysisCache;
use echo_engine_core::guard::SequenceGuard;
use echo_engine_core::types::{PatternKind, Prediction};

fn bench_detection(c: &mut Criterion) {
    let arithmetic = [1.0, 2.0, 3.0, 4.0, 5.0];
    let geometric = [2.0, 4.0, 8.0, 16.0, 32.0];
    let polynomial = [1.0, 4.0, 9.0, 16.0, 25.0];

    c.bench_function("detect_arithmetic", |b| {
        b.iter(|| {
            let mut analyzer = SequenceAnalyzer::new();
            black_box(analyzer.detect(black_box(&arithmetic)))
        })
    });

    c.bench_function("detect_geometric", |b| {
        b.iter(|| {
            let mut analyzer = SequenceAnalyzer::new();
            black_box(analyzer.detect(black_box(&geometric)))
        })
    });

    c.bench_function("detect_polynomial", |b| {
        b.iter(|| {
            let mut analyzer = SequenceAnalyzer::new();
            black_box(analyzer.detect(black_box(&polynomial)))
        })
    });
}

fn bench_prediction(c: &mut Criterion) {
    let arithmetic = [1.0, 2.0, 3.0, 4.0, 5.0];

    c.bench_function("predict_5_steps", |b| {
        let mut analyzer = SequenceAnalyzer::new();
        b.iter(|| black_box(analyzer.predict(black_box(&arithmetic), 5)))
    });

    c.bench_function("predict_20_steps", |b| {
        let mut analyzer = SequenceAnalyzer::new();
        b.iter(|| black_box(analyzer.predict(black_box(&arithmetic), 20)))
    });
}

fn bench_large_sequences(c: &mut Criterion) {
    let large: Vec<f64> = (1..=10_000).map(|i| i as f64).collect();
    let guard = SequenceGuard::default();

    c.bench_function("detect_large_10k", |b| {
        b.iter(|| {
            let mut analyzer = SequenceAnalyzer::new();
            black_box(analyzer.detect(black_box(&large)))
        })
    });

    c.bench_function("validate_10k", |b| {
        b.iter(|| black_box(guard.validate(black_box(&large))))
    });

    c.bench_function("downsample_10k_to_1k", |b| {
        b.iter(|| black_box(SequenceGuard::downsample(black_box(&large), 10)))
    });
}

fn bench_cache(c: &mut Criterion) {
    let sequence = [1.0, 2.0, 3.0, 4.0, 5.0];
    let prediction = Prediction {
        kind: PatternKind::Arithmetic,
        name: PatternKind::Arithmetic.display_name(),
        confidence: 1.0,
        parameters: vec![1.0],
        next_value: 6.0,
        predictions: vec![6.0, 7.0, 8.0],
    };

    let mut cache = AnalysisCache::new(1000);
    cache.set(&sequence, prediction);

    c.bench_function("cache_hit", |b| {
        b.iter(|| black_box(cache.get(black_box(&sequence))))
    });
}

criterion_group!(
    benches,
    bench_detection,
    bench_prediction,
    bench_large_sequences,
    bench_cache
);
criterion_main!(benches);
