//! Benchmarks for RFX operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use rfx_core::pattern::Pattern;
use rfx_core::TileMode;
use rfx_graph::{resolve, resolve_name, EffectCatalog, EffectId};
use rfx_ops::blur::gaussian_blur;
use rfx_ops::{RenderConfig, Renderer};

/// Benchmark graph construction versus cached lookup.
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    group.bench_function("all_ids", |b| {
        b.iter(|| {
            for id in EffectId::ALL {
                black_box(resolve(black_box(id)));
            }
        })
    });

    group.bench_function("by_name", |b| {
        b.iter(|| black_box(resolve_name(black_box("Chromatic Aberration"))))
    });

    let catalog = EffectCatalog::new();
    group.bench_function("catalog_get", |b| {
        b.iter(|| {
            for id in EffectId::ALL {
                black_box(catalog.get(black_box(id)));
            }
        })
    });

    group.finish();
}

/// Benchmark every catalog effect on a 256x256 checkerboard.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let src = Pattern::CHECKER.render(256, 256).expect("pattern");
    group.throughput(Throughput::Elements(src.pixel_count() as u64));

    let renderer = Renderer::default();
    for id in EffectId::ALL {
        let graph = resolve(id);
        group.bench_with_input(BenchmarkId::new("effect", id.name()), &graph, |b, g| {
            b.iter(|| renderer.render(black_box(g), black_box(&src)))
        });
    }

    group.finish();
}

/// Benchmark blur radius scaling, serial versus parallel.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");
    let src = Pattern::Gradient.render(512, 512).expect("pattern");
    group.throughput(Throughput::Elements(src.pixel_count() as u64));

    for radius in [5.0f32, 25.0, 50.0] {
        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "serial" };
            group.bench_with_input(BenchmarkId::new(label, radius), &radius, |b, &r| {
                b.iter(|| gaussian_blur(black_box(&src), r, r, TileMode::Clamp, parallel))
            });
        }
    }

    group.finish();
}

/// Shader kernels with shaders disabled measure the pass-through cost.
fn bench_shader_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("shader_gate");
    let src = Pattern::Gradient.render(256, 256).expect("pattern");
    let graph = resolve(EffectId::SwirlDistortion);

    for enabled in [true, false] {
        let renderer = Renderer::new(RenderConfig {
            runtime_shaders: enabled,
            ..Default::default()
        });
        group.bench_with_input(BenchmarkId::new("swirl", enabled), &enabled, |b, _| {
            b.iter(|| renderer.render(black_box(&graph), black_box(&src)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_render, bench_blur, bench_shader_gate);

criterion_main!(benches);
