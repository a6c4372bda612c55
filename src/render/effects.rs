//! The effects compositor.
//!
//! [`apply_effects`] runs each effect of an [`EffectSpec`] in stage order,
//! every stage producing a new image. Canvas growth (shadow, tile) only adds
//! space to the right and bottom.

use image::{imageops, Rgba, RgbaImage};
use palette::{Mix, Srgb};

use crate::types::{Colour, Effect, EffectSpec, FadeKind, FlipAxis, PatternSpec, ShadowKind, TileKind};

use super::composite::{blend_over, composite_over, silhouette, transparent_canvas};
use super::pattern::generate_pattern;

/// Alpha of the colour spill overlay.
pub const SPILL_ALPHA: u8 = 128;

/// Alpha of a full-strength shadow layer.
pub const SHADOW_ALPHA: u8 = 128;

/// Apply every effect in `spec`, in pipeline order.
pub fn apply_effects(img: &RgbaImage, spec: &EffectSpec) -> RgbaImage {
    spec.iter()
        .fold(img.clone(), |current, effect| apply_effect(&current, effect))
}

/// Apply a single effect.
pub fn apply_effect(img: &RgbaImage, effect: &Effect) -> RgbaImage {
    match effect {
        Effect::Flip { axis } => flip(img, *axis),
        Effect::ColourSpill { from, to } => colour_spill(img, *from, *to),
        Effect::Fade { kind, amount } => fade(img, *kind, *amount),
        Effect::Pattern(spec) => pattern_backdrop(img, spec),
        Effect::Shadow {
            kind,
            offset,
            colour,
        } => shadow(img, *kind, *offset, *colour),
        Effect::Tile { kind, count } => tile(img, *kind, *count),
    }
}

/// Mirror the image along an axis.
pub fn flip(img: &RgbaImage, axis: FlipAxis) -> RgbaImage {
    match axis {
        FlipAxis::Horizontal => imageops::flip_horizontal(img),
        FlipAxis::Vertical => imageops::flip_vertical(img),
        FlipAxis::Both => imageops::rotate180(img),
    }
}

fn to_srgb(colour: Colour) -> Srgb<f32> {
    Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    )
}

fn to_channel(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Overlay a translucent vertical gradient from `from` (top) to `to` (bottom).
pub fn colour_spill(img: &RgbaImage, from: Colour, to: Colour) -> RgbaImage {
    let (start, end) = (to_srgb(from), to_srgb(to));
    let height = img.height().max(1) as f32;

    let rows: Vec<Rgba<u8>> = (0..img.height())
        .map(|y| {
            let c = start.mix(end, y as f32 / height);
            Rgba([to_channel(c.red), to_channel(c.green), to_channel(c.blue), SPILL_ALPHA])
        })
        .collect();

    let mut out = img.clone();
    for (_, y, px) in out.enumerate_pixels_mut() {
        *px = blend_over(*px, rows[y as usize]);
    }
    out
}

/// Perceived luminance as used for contrast, in 0-255.
fn luminance(px: &Rgba<u8>) -> u32 {
    (px[0] as u32 * 299 + px[1] as u32 * 587 + px[2] as u32 * 114) / 1000
}

fn mean_luminance(img: &RgbaImage) -> f32 {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let total: u64 = img.pixels().map(|px| luminance(px) as u64).sum();
    (total as f64 / count as f64 + 0.5).floor() as f32
}

fn scale_rgb(px: &mut Rgba<u8>, f: impl Fn(f32) -> f32) {
    for c in 0..3 {
        px[c] = f(px[c] as f32).round().clamp(0.0, 255.0) as u8;
    }
}

/// Fade the image. `amount` is clamped to 0.0-1.0.
pub fn fade(img: &RgbaImage, kind: FadeKind, amount: f32) -> RgbaImage {
    let amount = amount.clamp(0.0, 1.0);
    let mut out = img.clone();

    match kind {
        FadeKind::Transparent => {
            let keep = 1.0 - amount;
            for px in out.pixels_mut() {
                px[3] = (px[3] as f32 * keep).round().clamp(0.0, 255.0) as u8;
            }
        }
        FadeKind::White => {
            let mean = mean_luminance(img);
            let contrast = 1.0 - amount;
            let brightness = 1.0 + amount;
            for px in out.pixels_mut() {
                scale_rgb(px, |v| mean + (v - mean) * contrast);
                scale_rgb(px, |v| v * brightness);
            }
        }
        FadeKind::Black => {
            let brightness = 1.0 - amount;
            for px in out.pixels_mut() {
                scale_rgb(px, |v| v * brightness);
            }
        }
    }

    out
}

/// Composite the image over a generated pattern of the same size.
pub fn pattern_backdrop(img: &RgbaImage, spec: &PatternSpec) -> RgbaImage {
    let mut backdrop = generate_pattern(spec, img.width(), img.height());
    composite_over(&mut backdrop, img, 0, 0);
    backdrop
}

/// Number of stacked layers and their spacing for a 3-D shadow.
pub fn shadow_layers(offset: u32) -> (u32, u32) {
    let layers = (offset / 2).clamp(1, 3);
    let step = (offset / layers).max(1);
    (layers, step)
}

fn scaled_alpha(base: u8, colour: Colour) -> u8 {
    ((base as u32 * colour.a as u32 + 127) / 255) as u8
}

/// Cast a drop or 3-D shadow to the lower right.
pub fn shadow(img: &RgbaImage, kind: ShadowKind, offset: u32, colour: Colour) -> RgbaImage {
    let (w, h) = img.dimensions();

    match kind {
        ShadowKind::Drop => {
            let mut canvas = transparent_canvas(w + offset, h + offset);
            let shade = silhouette(img, colour.with_alpha(scaled_alpha(SHADOW_ALPHA, colour)));
            composite_over(&mut canvas, &shade, offset as i64, offset as i64);
            composite_over(&mut canvas, img, 0, 0);
            canvas
        }
        ShadowKind::ThreeD => {
            let (layers, step) = shadow_layers(offset);
            let depth = layers * step;
            let mut canvas = transparent_canvas(w + depth, h + depth);

            for i in (1..=layers).rev() {
                let alpha = (SHADOW_ALPHA as u32 * i / layers) as u8;
                let shade = silhouette(img, colour.with_alpha(scaled_alpha(alpha, colour)));
                let at = (i * step) as i64;
                composite_over(&mut canvas, &shade, at, at);
            }
            composite_over(&mut canvas, img, 0, 0);
            canvas
        }
    }
}

/// Repeat the image on a `count` × `count` grid.
pub fn tile(img: &RgbaImage, kind: TileKind, count: u32) -> RgbaImage {
    let count = count.max(1);
    let (w, h) = img.dimensions();
    let mut canvas = transparent_canvas(w * count, h * count);

    for row in 0..count {
        for col in 0..count {
            let cell = match kind {
                TileKind::Grid => img.clone(),
                TileKind::Mirror => match (col % 2 == 1, row % 2 == 1) {
                    (false, false) => img.clone(),
                    (true, false) => imageops::flip_horizontal(img),
                    (false, true) => imageops::flip_vertical(img),
                    (true, true) => imageops::rotate180(img),
                },
            };
            imageops::replace(&mut canvas, &cell, (col * w) as i64, (row * h) as i64);
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::normalize::normalize;
    use crate::types::Pattern;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// A 6×4 transparent image with an asymmetric opaque L shape.
    fn glyph() -> RgbaImage {
        let mut img = transparent_canvas(6, 4);
        for y in 0..4 {
            img.put_pixel(0, y, RED);
        }
        img.put_pixel(1, 3, RED);
        img.put_pixel(2, 3, Rgba([0, 0, 255, 255]));
        img
    }

    #[test]
    fn test_flip_axes() {
        let img = glyph();
        assert_eq!(flip(&img, FlipAxis::Horizontal).get_pixel(5, 0), &RED);
        assert_eq!(flip(&img, FlipAxis::Vertical).get_pixel(1, 0), &RED);
        let both = flip(&img, FlipAxis::Both);
        assert_eq!(both.get_pixel(5, 0), &RED);
        assert_eq!(both.get_pixel(4, 0), &RED);
        assert_eq!(both.get_pixel(0, 0), &CLEAR);
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let img = glyph();
        let out = apply_effects(&img, &EffectSpec::new());
        assert_eq!(out.as_raw(), img.as_raw());
    }

    #[test]
    fn test_flip_then_shadow_order() {
        let img = glyph();
        let flip_fx = Effect::flip(FlipAxis::Horizontal);
        let shadow_fx = Effect::shadow(ShadowKind::Drop, 2, Colour::BLACK).unwrap();

        // Insertion order does not matter; flip always runs first.
        let spec = EffectSpec::new().with(shadow_fx.clone()).with(flip_fx.clone());
        let out = apply_effects(&img, &spec);

        let expected = apply_effect(&apply_effect(&img, &flip_fx), &shadow_fx);
        let reversed = apply_effect(&apply_effect(&img, &shadow_fx), &flip_fx);

        assert_eq!(out.as_raw(), expected.as_raw());
        assert_ne!(out.as_raw(), reversed.as_raw());
    }

    #[test]
    fn test_drop_shadow() {
        let img = glyph();
        let out = shadow(&img, ShadowKind::Drop, 2, Colour::BLACK);

        assert_eq!(out.dimensions(), (8, 6));
        assert_eq!(out.get_pixel(0, 0), &RED);
        // Shadow of the bottom-left pixel (0, 3) lands at (2, 5).
        assert_eq!(out.get_pixel(2, 5), &Rgba([0, 0, 0, 128]));
        // Original is on top of its own shadow.
        assert_eq!(out.get_pixel(2, 3), &Rgba([0, 0, 255, 255]));
        assert_eq!(out.get_pixel(7, 0), &CLEAR);
    }

    #[test]
    fn test_shadow_layers() {
        assert_eq!(shadow_layers(1), (1, 1));
        assert_eq!(shadow_layers(2), (1, 2));
        assert_eq!(shadow_layers(5), (2, 2));
        assert_eq!(shadow_layers(10), (3, 3));
    }

    #[test]
    fn test_three_d_shadow_layers_fade() {
        let mut img = transparent_canvas(1, 1);
        img.put_pixel(0, 0, RED);
        let out = shadow(&img, ShadowKind::ThreeD, 10, Colour::BLACK);

        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.get_pixel(0, 0), &RED);
        assert_eq!(out.get_pixel(3, 3), &Rgba([0, 0, 0, 42]));
        assert_eq!(out.get_pixel(6, 6), &Rgba([0, 0, 0, 85]));
        assert_eq!(out.get_pixel(9, 9), &Rgba([0, 0, 0, 128]));
    }

    #[test]
    fn test_mirror_tile() {
        let img = glyph();
        let out = tile(&img, TileKind::Mirror, 2);
        assert_eq!(out.dimensions(), (12, 8));

        let corner = imageops::crop_imm(&out, 6, 4, 6, 4).to_image();
        let mirrored = flip(&img, FlipAxis::Both);
        assert_eq!(corner.as_raw(), mirrored.as_raw());

        let right = imageops::crop_imm(&out, 6, 0, 6, 4).to_image();
        assert_eq!(right.as_raw(), flip(&img, FlipAxis::Horizontal).as_raw());
    }

    #[test]
    fn test_grid_tile_repeats() {
        let img = glyph();
        let out = tile(&img, TileKind::Grid, 3);
        assert_eq!(out.dimensions(), (18, 12));
        let cell = imageops::crop_imm(&out, 12, 8, 6, 4).to_image();
        assert_eq!(cell.as_raw(), img.as_raw());
    }

    #[test]
    fn test_fade_transparent_extremes() {
        let img = glyph();

        let gone = fade(&img, FadeKind::Transparent, 1.0);
        assert!(gone.pixels().all(|px| px[3] == 0));

        let same = fade(&img, FadeKind::Transparent, 0.0);
        assert_eq!(same.as_raw(), img.as_raw());
    }

    #[test]
    fn test_fade_black_halves() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 255]));
        let out = fade(&img, FadeKind::Black, 0.5);
        assert_eq!(out.get_pixel(0, 0), &Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn test_fade_white_brightens_and_keeps_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([100, 100, 100, 200]));
        let out = fade(&img, FadeKind::White, 0.5);
        // Uniform image: contrast has no effect, brightness × 1.5.
        assert_eq!(out.get_pixel(1, 1), &Rgba([150, 150, 150, 200]));
    }

    #[test]
    fn test_fade_white_pulls_towards_mean() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([200, 200, 200, 255]));
        let out = fade(&img, FadeKind::White, 0.5);
        // Mean 100: 0 -> 50 -> 75, 200 -> 150 -> 225.
        assert_eq!(out.get_pixel(0, 0), &Rgba([75, 75, 75, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([225, 225, 225, 255]));
    }

    #[test]
    fn test_fade_white_lifts_ink_on_cleared_page() {
        let mut page = RgbaImage::from_pixel(100, 60, Rgba([255, 255, 255, 255]));
        for y in 20..30 {
            for x in 20..50 {
                page.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let img = normalize(&page, 10);
        let out = fade(&img, FadeKind::White, 0.5);

        // Cleared paper still counts as white for the contrast pivot.
        let ink = out.get_pixel(15, 15);
        assert!(ink[0] > 100, "ink stayed dark: {:?}", ink);
        assert_eq!(ink[3], 255);
        assert_eq!(out.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_colour_spill_gradient() {
        let img = RgbaImage::from_pixel(1, 4, Rgba([255, 255, 255, 255]));
        let out = colour_spill(&img, Colour::BLACK, Colour::WHITE);

        // Top row: white with half black over it.
        assert_eq!(out.get_pixel(0, 0), &Rgba([127, 127, 127, 255]));
        // Rows brighten going down.
        assert!(out.get_pixel(0, 3)[0] > out.get_pixel(0, 1)[0]);
    }

    #[test]
    fn test_colour_spill_covers_transparent_pixels() {
        let img = transparent_canvas(1, 2);
        let out = colour_spill(&img, Colour::rgb(255, 0, 0), Colour::rgb(255, 0, 0));
        assert_eq!(out.get_pixel(0, 1), &Rgba([255, 0, 0, 128]));
    }

    #[test]
    fn test_pattern_behind_image() {
        let img = glyph();
        let spec = PatternSpec::new(Pattern::Stripes, Colour::WHITE, Colour::BLACK, 1).unwrap();
        let out = pattern_backdrop(&img, &spec);

        assert_eq!(out.dimensions(), img.dimensions());
        assert_eq!(out.get_pixel(0, 0), &RED);
        assert_eq!(out.get_pixel(5, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(5, 1), &Rgba([255, 255, 255, 255]));
    }
}
