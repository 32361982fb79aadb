//! # Trail Paint Benchmark
//!
//! Measures the per-frame CPU cost of the trail: fade, stamp and the RGBA
//! pack that precedes each texture upload.
//!
//! Run with: `cargo bench --bench trail_paint`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use glowtrail::{TextureConfig, TrailConfig, TrailPainter};

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint");

    for buffer_size in [64u32, 128, 256] {
        let config = TrailConfig {
            buffer_size,
            ..TrailConfig::enhanced()
        };
        let mut painter = TrailPainter::new(config, TextureConfig::radial_glow(64));
        let mut t = 0.0f32;

        group.bench_with_input(BenchmarkId::from_parameter(buffer_size), &buffer_size, |b, &size| {
            let center = Vec2::splat(size as f32 * 0.5);
            b.iter(|| {
                t += 0.05;
                let surface = center + Vec2::new(t.cos(), t.sin()) * size as f32 * 0.3;
                black_box(painter.paint(black_box(surface)))
            });
        });
    }

    group.finish();
}

fn bench_pack(c: &mut Criterion) {
    let mut painter = TrailPainter::new(TrailConfig::default(), TextureConfig::radial_glow(64));
    painter.paint(Vec2::splat(64.0));
    let mut out = Vec::new();

    c.bench_function("write_rgba8_128", |b| {
        b.iter(|| {
            painter.raster().write_rgba8(&mut out);
            black_box(out.len())
        });
    });
}

criterion_group!(benches, bench_paint, bench_pack);
criterion_main!(benches);
