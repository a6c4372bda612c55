//! Core domain types for bidet.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `ColourTable` - Named colours
//! - `FontTable` - PostScript faces and family resolution
//! - `PaperSize` - Paper dimensions in points
//! - `Effect` / `EffectSpec` - Compositor effects

mod colour;
mod effect;
mod font;
mod named;
mod paper;

pub use colour::Colour;
pub use effect::{
    Effect, EffectSpec, FadeKind, FlipAxis, Pattern, PatternSpec, ShadowKind, Stage, TileKind,
    MAX_PATTERN_SCALE, MAX_SHADOW_OFFSET, MAX_TILE_COUNT,
};
pub use font::{FontTable, ISO_FONTS, ISO_SUFFIX};
pub use named::ColourTable;
pub use paper::{PaperSize, DEFAULT_PAPER};
