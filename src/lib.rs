//! bidet - Big text for the terminal
//!
//! Lays text out as a PostScript page, rasterizes it with an external
//! interpreter, trims and decorates the raster with image effects, and hands
//! the result to a Sixel or ANSI encoder for display.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod external;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod request;
pub mod text;
pub mod types;
pub mod validation;

pub use config::{Config, Settings};
pub use document::{Align, ColourMode, Document, DocumentOptions, DrawCommand, Encoding};
pub use error::{BidetError, Result};
pub use external::{Ghostscript, Rasterizer, TerminalColours, TerminalEncoder, Workspace};
pub use pipeline::{build_document, run_pipeline, PipelineOutput, StageTimings};
pub use render::{apply_effects, generate_pattern, normalize, read_png, write_png};
pub use request::{RenderOptions, RenderRequest};
pub use types::{
    Colour, ColourTable, Effect, EffectSpec, FadeKind, FlipAxis, FontTable, PaperSize, Pattern,
    PatternSpec, ShadowKind, TileKind,
};
pub use validation::{validate_options, Diagnostic, Severity, ValidationResult};
