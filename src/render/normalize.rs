//! Cleanup of rasterizer output: background removal, auto-crop, padding.

use image::{imageops, Rgba, RgbaImage};

/// Channel value above which a pixel counts as paper white.
pub const WHITE_THRESHOLD: u8 = 240;

/// Default transparent margin around the cropped glyphs.
pub const DEFAULT_PADDING: u32 = 10;

/// Cleared paper: white with zero alpha, so tone effects still see a white page.
pub const CLEARED: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Make near-white pixels fully transparent.
pub fn clear_background(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        if px[0] > WHITE_THRESHOLD && px[1] > WHITE_THRESHOLD && px[2] > WHITE_THRESHOLD {
            *px = CLEARED;
        }
    }
}

/// Bounding box of pixels with non-zero alpha as `(x, y, width, height)`.
pub fn content_bounds(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, px) in img.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crop to the content bounds; an image with no visible pixels is returned unchanged.
pub fn crop(img: &RgbaImage) -> RgbaImage {
    match content_bounds(img) {
        Some((x, y, w, h)) => imageops::crop_imm(img, x, y, w, h).to_image(),
        None => img.clone(),
    }
}

/// Surround the image with a transparent margin on all sides.
pub fn pad(img: &RgbaImage, padding: u32) -> RgbaImage {
    if padding == 0 {
        return img.clone();
    }
    let mut canvas = RgbaImage::from_pixel(
        img.width() + 2 * padding,
        img.height() + 2 * padding,
        CLEARED,
    );
    imageops::replace(&mut canvas, img, padding as i64, padding as i64);
    canvas
}

/// Clear the paper background, crop to the glyphs and pad.
pub fn normalize(img: &RgbaImage, padding: u32) -> RgbaImage {
    let mut cleared = img.clone();
    clear_background(&mut cleared);
    pad(&crop(&cleared), padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::composite::transparent_canvas;

    const INK: Rgba<u8> = Rgba([10, 20, 30, 255]);

    fn paper_with_ink() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(40, 30, Rgba([255, 255, 255, 255]));
        for y in 10..15 {
            for x in 5..12 {
                img.put_pixel(x, y, INK);
            }
        }
        img
    }

    #[test]
    fn test_clear_background_threshold() {
        let mut img = RgbaImage::from_pixel(3, 1, Rgba([241, 241, 241, 255]));
        img.put_pixel(1, 0, Rgba([240, 255, 255, 255]));
        img.put_pixel(2, 0, Rgba([255, 255, 100, 255]));
        clear_background(&mut img);

        assert_eq!(img.get_pixel(0, 0), &CLEARED);
        assert_eq!(img.get_pixel(1, 0)[3], 255);
        assert_eq!(img.get_pixel(2, 0)[3], 255);
    }

    #[test]
    fn test_content_bounds() {
        let mut img = paper_with_ink();
        clear_background(&mut img);
        assert_eq!(content_bounds(&img), Some((5, 10, 7, 5)));
    }

    #[test]
    fn test_empty_image_is_not_cropped() {
        let img = transparent_canvas(8, 6);
        assert_eq!(content_bounds(&img), None);
        assert_eq!(crop(&img).dimensions(), (8, 6));
    }

    #[test]
    fn test_normalize_crops_and_pads() {
        let out = normalize(&paper_with_ink(), DEFAULT_PADDING);
        assert_eq!(out.dimensions(), (7 + 20, 5 + 20));
        assert_eq!(out.get_pixel(0, 0), &CLEARED);
        assert_eq!(out.get_pixel(5, 5), &CLEARED);
        assert_eq!(out.get_pixel(10, 10), &INK);
        assert_eq!(out.get_pixel(16, 14), &INK);
        assert_eq!(out.get_pixel(17, 14)[3], 0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&paper_with_ink(), DEFAULT_PADDING);
        let twice = normalize(&once, DEFAULT_PADDING);
        assert_eq!(once.dimensions(), twice.dimensions());
        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn test_zero_padding() {
        let out = normalize(&paper_with_ink(), 0);
        assert_eq!(out.dimensions(), (7, 5));
    }
}
