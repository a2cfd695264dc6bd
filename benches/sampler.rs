//! Performance benchmarks for SYMBIONT

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use symbiont::forest::LineageForest;
use symbiont::sampler::PathSampler;
use symbiont::seed::SeedRecord;

/// Build a run with one fusion root over a binary asexual descendant
/// tree of roughly `size` seeds.
fn branching_run(size: u64) -> Vec<SeedRecord> {
    let mut records = vec![
        SeedRecord::random(0),
        SeedRecord::random(1),
        SeedRecord::fusion(2, 0, 1),
    ];
    for id in 3..size {
        let parent = 2 + (id - 3) / 2;
        records.push(SeedRecord::asexual(id, parent));
    }
    records
}

fn benchmark_forest_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_build");

    for size in [1_000u64, 10_000, 50_000].iter() {
        let records = branching_run(*size);

        group.bench_with_input(BenchmarkId::new("records", size), size, |b, _| {
            b.iter(|| LineageForest::build(black_box(&records)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for exponent in [2u32, 3, 4].iter() {
        let records = branching_run(2_000);
        let forest = LineageForest::build(&records).unwrap();

        group.bench_with_input(
            BenchmarkId::new("sample_exponent", exponent),
            exponent,
            |b, &exp| {
                b.iter(|| {
                    let mut sampler = PathSampler::with_seed(exp, 42);
                    sampler.analyze(black_box(2), &forest).unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_forest_build, benchmark_analyze);
criterion_main!(benches);
