//! Fee calculation benchmarks
//!
//! Critical-path latency for the billing orchestrator (target: <10us per
//! calculation):
//! - Fixed-rate resolution and fee
//! - Tiered cascading-cap fee
//! - Discounted fee including bracket lookup

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feegrid_common::FeeRequest;
use feegrid_engine::FeeEngine;
use rust_decimal_macros::dec;

fn monday_at_nine() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 11)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Benchmark plan resolution plus base-fee computation
fn bench_base_fee(c: &mut Criterion) {
    let engine = FeeEngine::with_builtin_catalog();
    let date = monday_at_nine();

    let mut group = c.benchmark_group("base_fee");

    for plan in ["fixedRate", "timeBased", "dayBased", "tiered"] {
        group.bench_with_input(BenchmarkId::from_parameter(plan), plan, |b, plan| {
            let request = FeeRequest::new(*plan, dec!(1500), date);
            b.iter(|| engine.calculate_fee(black_box(&request)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the discounted path, bracket lookup included
fn bench_discounted_fee(c: &mut Criterion) {
    let engine = FeeEngine::with_builtin_catalog();
    let date = monday_at_nine();

    let mut group = c.benchmark_group("discounted_fee");

    for age in [5u32, 30, 70] {
        group.bench_with_input(BenchmarkId::new("age", age), &age, |b, &age| {
            let request = FeeRequest::new("ageBasedDiscount", dec!(10), date).with_age(age);
            b.iter(|| engine.calculate_fee(black_box(&request)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_base_fee, bench_discounted_fee);
criterion_main!(benches);
