//! Criterion benchmarks for report aggregation.
//!
//! Run with: `cargo bench -p tradejournal-analytics`

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tradejournal_analytics::{analyze, analyze_by_journal};
use tradejournal_core::TradeRecord;

const SESSIONS: [&str; 3] = ["London", "New York", "Asian"];
const REASONS: [&str; 5] = ["breakout", "pullback", "news", "fade", "revenge"];
const JOURNALS: [&str; 4] = ["Main", "Swing", "Scalps", "Funded"];

/// Deterministic synthetic trade log, a few trades per day.
fn generate_trades(count: usize) -> Vec<TradeRecord> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap();
    (0..count)
        .map(|i| {
            let date = start
                + chrono::Duration::days((i / 4) as i64)
                + chrono::Duration::minutes((i % 4) as i64 * 90);
            let result = ((i * 37) % 200) as f64 - 90.0;
            TradeRecord::new(date, result)
                .with_session(SESSIONS[i % SESSIONS.len()])
                .with_reason(REASONS[(i * 7) % REASONS.len()])
                .with_journal(JOURNALS[i % JOURNALS.len()])
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for size in [100, 1_000, 10_000] {
        let trades = generate_trades(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &trades, |b, trades| {
            b.iter(|| analyze(black_box(trades)));
        });
    }
    group.finish();
}

fn bench_analyze_by_journal(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_by_journal");
    for size in [1_000, 10_000] {
        let trades = generate_trades(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &trades, |b, trades| {
            b.iter(|| analyze_by_journal(black_box(trades)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze, bench_analyze_by_journal);
criterion_main!(benches);
