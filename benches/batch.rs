#[macro_use]
extern crate criterion;

use chaosgame::{Canvas, Drawing, Polygon, Raster, Rule, Sampler};
use criterion::{black_box, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sampler() -> Sampler<StdRng> {
    let canvas = Canvas::new(600, 600).unwrap();
    let mut sampler = Sampler::new(StdRng::seed_from_u64(0));
    sampler.select(Polygon::regular(5, &canvas, 0.0).unwrap(), Rule::VectorCenter);
    sampler.seed_cursor(&canvas);
    sampler
}

fn sample_batch(c: &mut Criterion) {
    let mut sampler = sampler();
    c.bench_function("next_batch 100", move |b| {
        b.iter(|| sampler.next_batch(black_box(100)).unwrap())
    });
}

fn paint_batch(c: &mut Criterion) {
    let points = sampler().next_batch(10_000).unwrap();
    let canvas = Canvas::new(600, 600).unwrap();
    let mut simple = Raster::new(canvas, [255, 255, 204, 255]);
    c.bench_function("paint simple 10k", move |b| {
        b.iter(|| simple.paint(black_box(&points), Drawing::Simple))
    });

    let points = sampler().next_batch(10_000).unwrap();
    let mut antialiased = Raster::new(canvas, [255, 255, 204, 255]);
    c.bench_function("paint antialiased 10k", move |b| {
        b.iter(|| antialiased.paint(black_box(&points), Drawing::Antialiased))
    });
}

criterion_group!(benches, sample_batch, paint_batch);
criterion_main!(benches);
