//! Procedural background patterns.
//!
//! Every pattern starts from a canvas filled with `colour1` and draws its
//! motif in `colour2`, using `scale` as the spatial period. Only bubbles
//! uses randomness, drawn from a PRNG seeded with the pattern's seed on every
//! call. Motifs are drawn with tiny-skia, aliased, so the output holds only
//! the two pattern colours.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tiny_skia::{
    BlendMode, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use crate::types::{Colour, Pattern, PatternSpec};

/// Canvas area above which the motif period is widened.
pub const LARGE_CANVAS_AREA: u64 = 1_000_000;

/// Minimum period used on large canvases.
pub const LARGE_CANVAS_MIN_SCALE: u32 = 30;

/// Angular frequency of the waves pattern, in radians per pixel.
const WAVE_FREQUENCY: f32 = 0.05;

/// Effective period for a canvas size.
pub fn effective_scale(scale: u32, width: u32, height: u32) -> u32 {
    let scale = scale.max(1);
    if width as u64 * height as u64 > LARGE_CANVAS_AREA {
        scale.max(LARGE_CANVAS_MIN_SCALE)
    } else {
        scale
    }
}

/// Aliasing-free paint that replaces the pixels it covers.
fn paint(colour: Colour) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(colour.r, colour.g, colour.b, colour.a);
    paint.anti_alias = false;
    paint.blend_mode = BlendMode::Source;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        ..Stroke::default()
    }
}

/// Fill the pixel-aligned rectangle at (`x`, `y`) of size `w` × `h`.
fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        pixmap.fill_rect(rect, paint, Transform::identity(), None);
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: Option<Path>, paint: &Paint, width: f32) {
    if let Some(path) = path {
        pixmap.stroke_path(&path, paint, &stroke(width), Transform::identity(), None);
    }
}

fn fill_path(pixmap: &mut Pixmap, path: Option<Path>, paint: &Paint) {
    if let Some(path) = path {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn polyline(points: impl IntoIterator<Item = (f32, f32)>) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.finish()
}

/// Copy a pixmap out as straight-alpha RGBA.
fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

/// Generate a pattern image of the given size.
pub fn generate_pattern(spec: &PatternSpec, width: u32, height: u32) -> RgbaImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbaImage::from_pixel(width, height, spec.colour1.into());
    };
    let background = paint(spec.colour1);
    let ink = paint(spec.colour2);
    fill_rect(&mut pixmap, 0.0, 0.0, width as f32, height as f32, &background);

    let scale = effective_scale(spec.scale, width, height);
    let s = scale as f32;
    let period = 2 * scale as usize;
    let (w, h) = (width as f32, height as f32);

    match spec.pattern {
        Pattern::Checkerboard => {
            for y in (0..height).step_by(period) {
                for x in (0..width).step_by(period) {
                    let (x, y) = (x as f32, y as f32);
                    fill_rect(&mut pixmap, x, y, s, s, &ink);
                    fill_rect(&mut pixmap, x + s, y + s, s, s, &ink);
                }
            }
        }
        Pattern::Dots => {
            let radius = (scale / 2) as f32;
            for y in (scale / 2..height).step_by(period) {
                for x in (scale / 2..width).step_by(period) {
                    let circle = PathBuilder::from_circle(x as f32, y as f32, radius);
                    fill_path(&mut pixmap, circle, &ink);
                }
            }
        }
        Pattern::Grid => {
            for y in (0..height).step_by(scale as usize) {
                fill_rect(&mut pixmap, 0.0, y as f32, w, 1.0, &ink);
            }
            for x in (0..width).step_by(scale as usize) {
                fill_rect(&mut pixmap, x as f32, 0.0, 1.0, h, &ink);
            }
        }
        Pattern::Stripes => {
            for y in (0..height).step_by(period) {
                fill_rect(&mut pixmap, 0.0, y as f32, w, s, &ink);
            }
        }
        Pattern::Waves => {
            let amplitude = s / 2.0;
            for y in (0..height).step_by(period) {
                let wave = (0..width + scale)
                    .step_by(scale as usize)
                    .map(|x| (x as f32, y as f32 + (x as f32 * WAVE_FREQUENCY).sin() * amplitude));
                stroke_path(&mut pixmap, polyline(wave), &ink, 2.0);
            }
        }
        Pattern::Zigzag => {
            for y in (0..height).step_by(period) {
                let zigzag = (0..width + scale).step_by(scale as usize).map(|x| {
                    let dip = if x % (2 * scale) == 0 { s } else { 0.0 };
                    (x as f32, y as f32 + dip)
                });
                stroke_path(&mut pixmap, polyline(zigzag), &ink, 2.0);
            }
        }
        Pattern::Crosshatch => {
            for y in (-(height as i64)..2 * height as i64).step_by(period) {
                let y = y as f32;
                stroke_path(&mut pixmap, polyline([(0.0, y), (w, y + w)]), &ink, 1.0);
                stroke_path(&mut pixmap, polyline([(0.0, y + w), (w, y)]), &ink, 1.0);
            }
        }
        Pattern::Bricks => {
            let brick_w = 2.0 * s;
            for (row, y) in (0..height).step_by(scale as usize).enumerate() {
                let y = y as f32;
                let mut x = if row % 2 == 1 { -s } else { 0.0 };
                while x < w {
                    // Pixel-aligned outline: top, bottom, left, right.
                    fill_rect(&mut pixmap, x, y, brick_w, 1.0, &ink);
                    fill_rect(&mut pixmap, x, y + s - 1.0, brick_w, 1.0, &ink);
                    fill_rect(&mut pixmap, x, y, 1.0, s, &ink);
                    fill_rect(&mut pixmap, x + brick_w - 1.0, y, 1.0, s, &ink);
                    x += brick_w;
                }
            }
        }
        Pattern::Diamonds => {
            let half = s / 2.0;
            for y in (0..height).step_by(period) {
                for x in (0..width).step_by(period) {
                    let (x, y) = (x as f32, y as f32);
                    let diamond = polyline([
                        (x + half, y),
                        (x + s, y + half),
                        (x + half, y + s),
                        (x, y + half),
                    ]);
                    fill_path(&mut pixmap, diamond, &ink);
                }
            }
        }
        Pattern::Bubbles => {
            let mut rng = StdRng::seed_from_u64(spec.seed);
            let count = bubble_count(width, height, scale);
            let (r_min, r_max) = (scale / 4, (scale / 2).max(scale / 4));
            for _ in 0..count {
                let x = rng.random_range(0..=width) as f32;
                let y = rng.random_range(0..=height) as f32;
                let radius = rng.random_range(r_min..=r_max) as f32;
                let bubble = PathBuilder::from_circle(x, y, radius);
                fill_path(&mut pixmap, bubble.clone(), &ink);
                stroke_path(&mut pixmap, bubble, &background, 1.0);
            }
        }
    }

    to_image(&pixmap)
}

/// Number of bubbles for a canvas: proportional to area over `scale²`.
pub fn bubble_count(width: u32, height: u32, scale: u32) -> u64 {
    let scale = scale.max(1) as u64;
    (width as u64 * height as u64 / (scale * scale * 10)).max(20)
}
