//! Benchmarks for grid geometry and hit testing.
//!
//! Run with: cargo bench -p collage-layout

use collage_layout::{GridMetrics, Point, Slot, classify, layout_all, layout_for};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_layout_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/layout_all");

    for width in [360, 720, 1080, 1440] {
        let Ok(metrics) = GridMetrics::for_device(width, 4) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(width), &metrics, |b, m| {
            b.iter(|| black_box(layout_all(m)))
        });
    }

    group.finish();
}

fn bench_layout_for_each_slot(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/layout_for");
    let Ok(metrics) = GridMetrics::for_device(1080, 6) else {
        return;
    };

    for slot in Slot::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(slot), &slot, |b, &slot| {
            b.iter(|| black_box(layout_for(slot, &metrics)))
        });
    }

    group.finish();
}

fn bench_classify_sweep(c: &mut Criterion) {
    let width = 1080;
    let points: Vec<Point> = (0..1000)
        .step_by(7)
        .flat_map(|y| (0..width).step_by(11).map(move |x| Point::new(x, y)))
        .collect();

    c.bench_function("hit_test/classify_sweep", |b| {
        b.iter(|| {
            for p in &points {
                black_box(classify(*p, width));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_layout_all,
    bench_layout_for_each_slot,
    bench_classify_sweep
);
criterion_main!(benches);
