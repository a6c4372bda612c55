//! Straight-alpha compositing.
//!
//! All blending in the pipeline goes through [`blend_over`], the Porter-Duff
//! "over" operator on non-premultiplied RGBA.

use image::{Rgba, RgbaImage};

use crate::types::Colour;

/// A fully transparent canvas.
pub fn transparent_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}

/// Composite `src` over `dst` for a single pixel.
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| -> u8 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Composite `src` over `dst` with its top-left corner at (`x`, `y`).
///
/// Parts of `src` outside `dst` are clipped.
pub fn composite_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (dst.width() as i64, dst.height() as i64);

    for (sx, sy, px) in src.enumerate_pixels() {
        let dx = x + sx as i64;
        let dy = y + sy as i64;
        if dx < 0 || dy < 0 || dx >= dw || dy >= dh {
            continue;
        }
        let below = *dst.get_pixel(dx as u32, dy as u32);
        dst.put_pixel(dx as u32, dy as u32, blend_over(below, *px));
    }
}

/// The image's alpha mask filled with a solid colour.
///
/// Output alpha is the source alpha scaled by the colour's alpha.
pub fn silhouette(src: &RgbaImage, colour: Colour) -> RgbaImage {
    RgbaImage::from_fn(src.width(), src.height(), |x, y| {
        let mask = src.get_pixel(x, y)[3] as u32;
        let alpha = (mask * colour.a as u32 + 127) / 255;
        Rgba([colour.r, colour.g, colour.b, alpha as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_source_replaces() {
        let out = blend_over(Rgba([1, 2, 3, 255]), Rgba([9, 9, 9, 255]));
        assert_eq!(out, Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_transparent_source_keeps_destination() {
        let out = blend_over(Rgba([1, 2, 3, 200]), Rgba([9, 9, 9, 0]));
        assert_eq!(out, Rgba([1, 2, 3, 200]));
    }

    #[test]
    fn test_half_over_transparent_is_straight() {
        // Straight alpha: colour is not darkened by the empty backdrop.
        let out = blend_over(Rgba([0, 0, 0, 0]), Rgba([200, 100, 50, 128]));
        assert_eq!(out, Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn test_half_over_opaque() {
        let out = blend_over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(out[3], 255);
        assert_eq!(out[0], 128);
    }

    #[test]
    fn test_composite_clips() {
        let mut dst = transparent_canvas(2, 2);
        let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        composite_over(&mut dst, &src, 1, -1);

        assert_eq!(dst.get_pixel(1, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(dst.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(dst.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_silhouette_scales_mask() {
        let mut src = transparent_canvas(2, 1);
        src.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        let sil = silhouette(&src, Colour::BLACK.with_alpha(128));

        assert_eq!(sil.get_pixel(0, 0), &Rgba([0, 0, 0, 128]));
        assert_eq!(sil.get_pixel(1, 0), &Rgba([0, 0, 0, 0]));
    }
}
