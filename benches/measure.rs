//! Benchmarks of measure construction and point lookup.

#![expect(missing_docs, reason = "criterion emits undocumented functions")]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use kontur::{Contour, Direction, PathBuilder, Point};

fn wavy_contour() -> Contour {
    let mut b = PathBuilder::new();
    b.move_to((0.0, 0.0));
    for i in 0..16 {
        let x = i as f64;
        b.cubic_to((x + 0.3, 2.0), (x + 0.7, -2.0), (x + 1.0, 0.0));
    }
    b.build().into_contours().next().unwrap()
}

fn bench_build_measure(cc: &mut Criterion) {
    let contour = wavy_contour();
    for tolerance in [0.5, 1e-2, 1e-4] {
        cc.bench_with_input(
            BenchmarkId::new("build measure", tolerance),
            &tolerance,
            |bb, tolerance| {
                bb.iter(|| black_box(&contour).measure(*tolerance));
            },
        );
    }
}

fn bench_point_lookup(cc: &mut Criterion) {
    let contour = wavy_contour();
    let measure = contour.measure(1e-3);
    cc.bench_function("point at distance", |bb| {
        bb.iter(|| {
            let mut acc = 0.0;
            for i in 0..100 {
                let d = measure.length() * i as f64 / 100.0;
                let (pos, _) = black_box(&contour).point(&measure, d, Direction::End);
                acc += pos.x;
            }
            acc
        });
    });
}

fn bench_closest_point(cc: &mut Criterion) {
    let contour = wavy_contour();
    let measure = contour.measure(1e-3);
    cc.bench_function("closest point", |bb| {
        bb.iter(|| {
            black_box(&contour).closest_point(
                &measure,
                1e-3,
                black_box(Point::new(8.0, 3.0)),
                f64::INFINITY,
            )
        });
    });
}

criterion_group!(
    benches,
    bench_build_measure,
    bench_point_lookup,
    bench_closest_point
);
criterion_main!(benches);
