use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use jobber_core::metrics::{partial_ratio, partial_token_set_ratio, simple_ratio, token_set_ratio};
use jobber_core::model::ApplicantResponse;
use jobber_core::{ApplicationScorer, RatioSet};

const CANONICAL: &str = "A hash map stores key value pairs and offers average constant time lookup";
const ANSWER: &str = "hash maps keep key/value pairs, lookups are constant time on average \
                      but degrade when many keys collide in the same bucket";

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");

    group.bench_function("simple_ratio", |b| {
        b.iter(|| simple_ratio(black_box(ANSWER), black_box(CANONICAL)))
    });

    group.bench_function("token_set_ratio", |b| {
        b.iter(|| token_set_ratio(black_box(ANSWER), black_box(CANONICAL)))
    });

    group.bench_function("partial_ratio", |b| {
        b.iter(|| partial_ratio(black_box(ANSWER), black_box(CANONICAL)))
    });

    group.bench_function("partial_token_set_ratio", |b| {
        b.iter(|| partial_token_set_ratio(black_box(ANSWER), black_box(CANONICAL)))
    });

    group.bench_function("ratio_set", |b| {
        b.iter(|| RatioSet::compute(black_box(ANSWER), black_box(CANONICAL)))
    });

    group.finish();
}

fn bench_scorer(c: &mut Criterion) {
    let mut group = c.benchmark_group("application_scorer");

    let key: HashMap<String, String> = (0..10)
        .map(|i| (format!("q{i}"), CANONICAL.to_string()))
        .collect();
    let responses: Vec<ApplicantResponse> = (0..10)
        .map(|i| ApplicantResponse::new(format!("q{i}"), ANSWER))
        .collect();
    let scorer = ApplicationScorer::new(key);

    group.bench_function("ten_responses", |b| {
        b.iter(|| scorer.score(black_box(&responses)))
    });

    group.finish();
}

criterion_group!(benches, bench_metrics, bench_scorer);
criterion_main!(benches);
