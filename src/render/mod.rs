//! Raster stages of the pipeline.
//!
//! Normalization of rasterizer output, procedural patterns, and the effects
//! compositor, all operating on `image::RgbaImage` with straight alpha.

mod composite;
mod effects;
mod normalize;
mod pattern;
mod png;

pub use composite::{blend_over, composite_over, silhouette, transparent_canvas};
pub use effects::{
    apply_effect, apply_effects, colour_spill, fade, flip, pattern_backdrop, shadow,
    shadow_layers, tile,
};
pub use normalize::{
    clear_background, content_bounds, crop, normalize, pad, CLEARED, DEFAULT_PADDING,
    WHITE_THRESHOLD,
};
pub use pattern::{bubble_count, effective_scale, generate_pattern};
pub use png::{read_png, write_png};
