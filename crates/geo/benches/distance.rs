//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spoon_geo::{annotate, calculate_distances, distance_miles, format_distance, Coordinate, DistanceUnit, LocationItem};

fn create_test_items(count: usize) -> Vec<LocationItem> {
    (0..count)
        .map(|i| {
            // Generate points in a grid around Atlanta
            let lat = 33.0 + (i as f64 * 0.01) % 2.0;
            let lng = -85.0 + (i as f64 * 0.01) % 2.0;
            LocationItem {
                id: format!("event-{i}"),
                location: Coordinate::new(lat, lng),
            }
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let los_angeles = Coordinate::new(34.0522, -118.2437);
    let new_york = Coordinate::new(40.7128, -74.0060);

    c.bench_function("haversine_miles_single", |b| {
        b.iter(|| distance_miles(black_box(&los_angeles), black_box(&new_york)))
    });
}

fn bench_batch_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_distances");
    let origin = Coordinate::new(33.7490, -84.3880);

    for size in [10, 100, 1000, 10000].iter() {
        let items = create_test_items(*size);

        group.bench_with_input(BenchmarkId::new("calculate", size), size, |b, _| {
            b.iter(|| calculate_distances(black_box(&origin), black_box(&items)))
        });

        group.bench_with_input(BenchmarkId::new("annotate", size), size, |b, _| {
            b.iter(|| annotate(black_box(&origin), items.clone(), |item| item.location))
        });
    }

    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_distance");

    group.bench_function("miles", |b| {
        b.iter(|| format_distance(black_box(347.4), DistanceUnit::Miles))
    });

    group.bench_function("km", |b| {
        b.iter(|| format_distance(black_box(347.4), DistanceUnit::Km))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_batch_distances,
    bench_formatting
);
criterion_main!(benches);
