//! PNG input and output for raster images.

use std::path::Path;

use image::RgbaImage;

use crate::error::{BidetError, Result};

/// Write an image to a PNG file.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| BidetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}

/// Read a PNG (or any format `image` recognises) as RGBA.
pub fn read_png(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| BidetError::Image {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;
    Ok(img.to_rgba8())
}
