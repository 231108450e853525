//! Benchmarks for signal detection

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gap_replay::bars::Bar;
use gap_replay::indicator;
use gap_replay::signal::SignalDetector;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One full 09:30-16:00 session of 5-minute bars with a mild oscillation
fn session_bars() -> Vec<Bar> {
    let open: NaiveDateTime = NaiveDate::from_ymd_opt(2025, 11, 10)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    (0..78)
        .map(|i| {
            let drift = Decimal::from(i % 11);
            let base = dec!(25) + drift * dec!(0.3);
            Bar {
                timestamp: open + chrono::Duration::minutes(i as i64 * 5),
                open: base,
                high: base + dec!(0.4),
                low: base - dec!(0.3),
                close: base + dec!(0.2),
                volume: dec!(40000) + drift * dec!(1000),
            }
        })
        .collect()
}

fn benchmark_detection_pass(c: &mut Criterion) {
    let detector = SignalDetector::with_defaults();
    let bars = session_bars();

    c.bench_function("detector_full_session", |b| {
        b.iter(|| detector.run(black_box(&bars), black_box(Some(dec!(26)))))
    });
}

fn benchmark_indicator_snapshots(c: &mut Criterion) {
    let bars = session_bars();

    c.bench_function("indicator_snapshots", |b| {
        b.iter(|| indicator::snapshots(black_box(&bars), 14))
    });
}

criterion_group!(benches, benchmark_detection_pass, benchmark_indicator_snapshots);
criterion_main!(benches);
