//! PostScript document synthesis.
//!
//! The builder records typed draw commands per page and serializes them to a
//! DSC-conforming PostScript program for the external rasterizer.

mod builder;
mod prologue;

pub use builder::{Align, ColourMode, Document, DocumentOptions, DrawCommand, Encoding, Page};
pub use prologue::ISO_LATIN1_ENCODING;
