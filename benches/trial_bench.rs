//! Trial throughput for the built-in walkthroughs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gamebook_sim::scenario::load_builtin;
use gamebook_sim::statistics::{run_trials, trial};

fn bench_single_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_trial");
    for name in ["warlock", "crypt"] {
        let scenario = load_builtin(name).expect("built-in scenario");
        let mut index = 0u64;
        group.bench_function(name, |b| {
            b.iter(|| {
                index += 1;
                black_box(trial(&scenario, 42, index))
            })
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let scenario = load_builtin("warlock").expect("built-in scenario");
    let mut group = c.benchmark_group("batch_10k");
    group.sample_size(10);
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_trials(&scenario, 10_000, 42, false)))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(run_trials(&scenario, 10_000, 42, true)))
    });
    group.finish();
}

criterion_group!(benches, bench_single_trial, bench_batch);
criterion_main!(benches);
