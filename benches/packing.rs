use criterion::{black_box, criterion_group, criterion_main, Criterion};

use disksweeper::{
    boundary,
    generators::{chain, hex_packing, jittered_strip},
    sweep, Radius,
};

fn chain_sweep(c: &mut Criterion) {
    let centers = chain(10_000, 0.6);
    c.bench_function("chain of 10k", |b| {
        b.iter(|| sweep(centers.iter().copied(), Radius::default(), |ev| {
            black_box(ev);
        }))
    });
}

fn packing_sweep(c: &mut Criterion) {
    // Mostly covered: nearly every crossing gets occluded or rejected.
    let centers = hex_packing(100, 100, 0.9);
    c.bench_function("hex packing 100x100", |b| {
        b.iter(|| black_box(boundary(centers.iter().copied(), Radius::default())))
    });
}

fn strip_sweep(c: &mut Criterion) {
    let centers = jittered_strip(20_000, 3.0, 42);
    c.bench_function("jittered strip of 20k", |b| {
        b.iter(|| black_box(boundary(centers.iter().copied(), Radius::default())))
    });

    // The window is much wider than the spacing, so this stresses the band queries.
    let wide = Radius::new(2.0).unwrap();
    c.bench_function("jittered strip of 20k, wide disks", |b| {
        b.iter(|| black_box(boundary(centers.iter().copied(), wide)))
    });
}

criterion_group!(benches, chain_sweep, packing_sweep, strip_sweep);
criterion_main!(benches);
