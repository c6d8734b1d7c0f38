//! Performance benchmarks for the map latency benchmark's own plumbing
//!
//! The measurement path must cost far less than the latencies it
//! measures; these benchmarks keep the ledger, statistics and payload
//! generation overhead visible.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use map_latency_bench::{
    generator::{PayloadGenerator, SizeClass, ValueGenerator},
    ledger::TimingLedger,
    stats::StatsSummary,
};

/// Build a ledger with `count` completed measurements
fn populated_ledger(count: u32) -> TimingLedger {
    let mut ledger = TimingLedger::new();
    for i in 0..count {
        let key = i.to_string();
        ledger.record_start(&key, 1_000 + i as i64);
        ledger.record_end(&key, 1_000 + i as i64 + 10 + (i as i64 % 40));
    }
    ledger
}

/// Sample durations resembling a real run
fn sample_durations(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 10.0 + (i % 50) as f64 + if i % 17 == 0 { 200.0 } else { 0.0 })
        .collect()
}

fn bench_ledger_durations(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_durations");
    for size in [100u32, 1_000, 10_000] {
        let ledger = populated_ledger(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| black_box(ledger.durations()))
        });
    }
    group.finish();
}

fn bench_stats_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_summary");
    for size in [100usize, 1_000, 10_000] {
        let durations = sample_durations(size);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &durations,
            |b, durations| b.iter(|| black_box(StatsSummary::from_durations(durations))),
        );
    }
    group.finish();
}

fn bench_payload_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_generation");
    for class in [SizeClass::Zero, SizeClass::One, SizeClass::Five, SizeClass::Ten] {
        group.bench_with_input(
            BenchmarkId::from_parameter(class.as_u32()),
            &class,
            |b, class| {
                let mut generator = PayloadGenerator::new(*class);
                b.iter(|| black_box(generator.generate()))
            },
        );
    }
    group.finish();
}

fn bench_ledger_record(c: &mut Criterion) {
    c.bench_function("ledger_record_pair", |b| {
        b.iter(|| {
            let mut ledger = TimingLedger::new();
            for i in 0..100u32 {
                let key = i.to_string();
                ledger.record_start(&key, i as i64);
                ledger.record_end(&key, i as i64 + 15);
            }
            black_box(ledger.completed_count())
        })
    });
}

criterion_group!(
    benches,
    bench_ledger_durations,
    bench_stats_summary,
    bench_payload_generation,
    bench_ledger_record
);
criterion_main!(benches);
