//! Benchmarks for the bidet raster stages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use bidet::render::{apply_effects, generate_pattern, normalize, DEFAULT_PADDING};
use bidet::types::{
    Colour, Effect, EffectSpec, FadeKind, FlipAxis, Pattern, PatternSpec, ShadowKind, TileKind,
};

/// A white page with a dark block of "text" in the upper left.
fn rasterized_page(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for y in height / 8..height / 4 {
        for x in width / 16..width / 2 {
            let edge = ((x + y) % 7) as u8 * 20;
            img.put_pixel(x, y, Rgba([edge, edge, edge, 255]));
        }
    }
    img
}

// -- Normalization benchmarks --

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let small = rasterized_page(320, 240);
    let page = rasterized_page(1600, 1200);

    group.bench_function("normalize_small", |b| {
        b.iter(|| normalize(black_box(&small), DEFAULT_PADDING))
    });

    group.bench_function("normalize_page", |b| {
        b.iter(|| normalize(black_box(&page), DEFAULT_PADDING))
    });

    group.finish();
}

// -- Pattern benchmarks --

fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns");

    for pattern in [Pattern::Checkerboard, Pattern::Waves, Pattern::Bubbles] {
        let spec = PatternSpec::new(pattern, Colour::WHITE, Colour::BLACK, 20)
            .unwrap()
            .with_seed(7);
        group.bench_function(pattern.name(), |b| {
            b.iter(|| generate_pattern(black_box(&spec), 400, 200))
        });
    }

    group.finish();
}

// -- Effect chain benchmarks --

fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("effects");

    let img = normalize(&rasterized_page(800, 600), DEFAULT_PADDING);

    let single = EffectSpec::new().with(Effect::flip(FlipAxis::Both));
    let full = EffectSpec::new()
        .with(Effect::flip(FlipAxis::Horizontal))
        .with(Effect::colour_spill(Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255)))
        .with(Effect::fade(FadeKind::White, 0.3).unwrap())
        .with(Effect::pattern(
            PatternSpec::new(Pattern::Diamonds, Colour::WHITE, Colour::BLACK, 20).unwrap(),
        ))
        .with(Effect::shadow(ShadowKind::ThreeD, 9, Colour::BLACK).unwrap())
        .with(Effect::tile(TileKind::Mirror, 2).unwrap());

    group.bench_function("effects_flip", |b| {
        b.iter(|| apply_effects(black_box(&img), &single))
    });

    group.bench_function("effects_full_chain", |b| {
        b.iter(|| apply_effects(black_box(&img), &full))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_patterns, bench_effects);
criterion_main!(benches);
