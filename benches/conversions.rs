use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use meteorfall::trajectory::Trajectory;
use meteorfall::{estimate, to_cartesian, to_geo, AsteroidParams, GeoPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn sample_points(size: usize, seed: u64) -> Vec<GeoPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|_| GeoPoint::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0)))
        .collect()
}

fn bench_coordinates(c: &mut Criterion) {
    let mut group = c.benchmark_group("Coordinates");

    for &size in &[100, 10_000] {
        let points = sample_points(size, 12345);

        group.bench_with_input(BenchmarkId::new("to_cartesian", size), &points, |b, pts| {
            b.iter(|| {
                for p in pts {
                    black_box(to_cartesian(*p));
                }
            });
        });

        let cartesians: Vec<_> = points.iter().map(|p| to_cartesian(*p)).collect();
        group.bench_with_input(BenchmarkId::new("to_geo", size), &cartesians, |b, pts| {
            b.iter(|| {
                for p in pts {
                    black_box(to_geo(*p).ok());
                }
            });
        });
    }

    group.finish();
}

fn bench_impact(c: &mut Criterion) {
    let params = AsteroidParams::new(1.0, 20.0, 2500.0).expect("reference params are valid");
    c.bench_function("estimate", |b| b.iter(|| black_box(estimate(black_box(&params)))));

    let target = to_cartesian(GeoPoint::new(25.0, -100.0));
    c.bench_function("trajectory to impact", |b| {
        b.iter(|| {
            Trajectory::new(target * 6.0, target, 20.0, 1.0 / 60.0, 10_000)
                .filter_map(|s| s.ok())
                .count()
        })
    });
}

criterion_group!(benches, bench_coordinates, bench_impact);
criterion_main!(benches);
