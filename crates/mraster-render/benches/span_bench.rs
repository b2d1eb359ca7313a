//! Benchmarks for word-masked span fills and the run-length codec.
//!
//! Span fills touch one word per 32 pixels, so `fill` should beat the
//! per-pixel loop by roughly an order of magnitude on wide areas.
//!
//! Run with: cargo bench -p mraster-render --bench span_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mraster_core::geometry::{Point, Rect};
use mraster_render::{Bitmap, Draw, rle};
use std::hint::black_box;

// =============================================================================
// Span fill vs per-pixel fill
// =============================================================================

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitmap/fill");

    for (w, h) in [(128, 64), (320, 240), (1024, 768)] {
        group.throughput(Throughput::Elements(w as u64 * h as u64));
        // Odd offsets so both partial words are exercised on every row.
        let area = Rect::new(3, 1, w as i32 - 4, h as i32 - 2);

        let mut spans = Bitmap::new(w, h, false);
        group.bench_with_input(BenchmarkId::new("span", format!("{w}x{h}")), &area, |b, area| {
            b.iter(|| {
                spans.fill(*area, true);
                spans.fill(*area, false);
                black_box(&spans);
            })
        });

        let mut pixels = Bitmap::new(w, h, false);
        group.bench_with_input(
            BenchmarkId::new("per_pixel", format!("{w}x{h}")),
            &area,
            |b, area| {
                b.iter(|| {
                    for value in [true, false] {
                        for y in area.min.y..=area.max.y {
                            for x in area.min.x..=area.max.x {
                                pixels.set(x, y, value);
                            }
                        }
                    }
                    black_box(&pixels);
                })
            },
        );
    }

    group.finish();
}

// =============================================================================
// Shapes
// =============================================================================

fn bench_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitmap/shapes");
    let mut bitmap = Bitmap::new(320, 240, false);

    group.bench_function("line_clipped", |b| {
        b.iter(|| {
            bitmap.line(Point::new(-100, -50), Point::new(500, 300), true);
            black_box(&bitmap);
        })
    });

    group.bench_function("circle_filled_r100", |b| {
        b.iter(|| {
            bitmap.circle_filled(Point::new(160, 120), 100, true);
            black_box(&bitmap);
        })
    });

    group.finish();
}

// =============================================================================
// Run-length codec
// =============================================================================

fn bench_rle(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitmap/rle");

    let mut bitmap = Bitmap::new(320, 240, false);
    for r in (10..120).step_by(15) {
        bitmap.circle(Point::new(160, 120), r, true);
    }
    let runs = rle::encode(false, &bitmap);
    group.throughput(Throughput::Elements(bitmap.pixel_count() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| black_box(rle::encode(false, black_box(&bitmap))))
    });

    let mut target = Bitmap::new(320, 240, false);
    group.bench_function("decode", |b| {
        b.iter(|| {
            rle::decode(false, black_box(&runs), &mut target).unwrap();
            black_box(&target);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_fill, bench_shapes, bench_rle);
criterion_main!(benches);
