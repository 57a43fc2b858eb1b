//! Criterion benchmarks for full propagation runs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use simprop_bench::{iron_profile, reference_profile};
use simprop_core::{Particle, Pid};
use simprop_engine::{MemorySink, SimRng};

fn bench_single_proton_run(c: &mut Criterion) {
    c.bench_function("proton_run_z1_g1e12", |b| {
        b.iter(|| {
            let mut engine = reference_profile(1).unwrap();
            let metrics = engine
                .run(&mut SimRng::new(42), &mut MemorySink::new())
                .unwrap();
            black_box(metrics);
        });
    });
}

fn bench_iron_run(c: &mut Criterion) {
    c.bench_function("iron_run_z2_g1e10", |b| {
        b.iter(|| {
            let mut engine = iron_profile(1).unwrap();
            let metrics = engine
                .run(&mut SimRng::new(42), &mut MemorySink::new())
                .unwrap();
            black_box(metrics);
        });
    });
}

fn bench_step_intervals(c: &mut Criterion) {
    let engine = reference_profile(1).unwrap();
    let p = Particle::new(Pid::PROTON, 1.0, 1e12);

    c.bench_function("losses_redshift_interval", |b| {
        b.iter(|| black_box(engine.compute_losses_redshift_interval(black_box(&p)).unwrap()));
    });
    c.bench_function("stochastic_redshift_interval", |b| {
        b.iter(|| {
            black_box(
                engine
                    .compute_stochastic_redshift_interval(black_box(&p), 0.5)
                    .unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_single_proton_run,
    bench_iron_run,
    bench_step_intervals
);
criterion_main!(benches);
