//! Headless match throughput.
//!
//! Run with: cargo bench --bench match_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cricket_core::api::{simulate_match, simulate_match_json, MatchRequest};
use cricket_core::config::{MatchConfig, OpponentTable};
use cricket_core::engine::{human_batting_outcome, OutcomeResolver, RngDraws};
use cricket_core::models::Delivery;

fn bench_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_match");
    for overs in [1u8, 2, 5] {
        group.bench_with_input(BenchmarkId::new("overs", overs), &overs, |b, &overs| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let mut request = MatchRequest::new(seed);
                request.overs = Some(overs);
                request.include_balls = false;
                black_box(simulate_match(&request, MatchConfig::default()))
            })
        });
    }
    group.finish();
}

fn bench_json_roundtrip(c: &mut Criterion) {
    let request = r#"{"schema_version": 1, "seed": 42}"#;
    c.bench_function("simulate_match_json", |b| {
        b.iter(|| black_box(simulate_match_json(black_box(request))))
    });
}

fn bench_outcome_tables(c: &mut Criterion) {
    let delivery = Delivery::default();
    let mut draws = RngDraws::seeded(7);

    c.bench_function("human_table", |b| {
        let mut r = 0.0f64;
        b.iter(|| {
            r = (r + 0.013) % 1.0;
            black_box(human_batting_outcome(black_box(r)))
        })
    });

    for table in [OpponentTable::SourceParity, OpponentTable::Normalized] {
        let resolver = OutcomeResolver::new(table);
        c.bench_function(&format!("opponent_table/{table:?}"), |b| {
            b.iter(|| black_box(resolver.resolve_opponent_batting(delivery, &mut draws)))
        });
    }
}

criterion_group!(benches, bench_full_match, bench_json_roundtrip, bench_outcome_tables);
criterion_main!(benches);
