//! The text → document → raster → effects pipeline.
//!
//! Data flows strictly forward: the request becomes a document, the
//! rasterizer turns it into pixels, the normalizer cleans them up and the
//! compositor applies the effect chain. Encoding for the terminal happens in
//! the caller.

use std::path::Path;
use std::time::{Duration, Instant};

use image::{imageops, RgbaImage};

use crate::config::Config;
use crate::document::{Align, ColourMode, Document, DocumentOptions, Encoding};
use crate::error::{BidetError, Result};
use crate::external::{interrupted, Rasterizer};
use crate::render::{apply_effect, normalize};
use crate::request::RenderRequest;
use crate::types::PaperSize;

/// Left margin of every text line, in points.
pub const LEFT_MARGIN: f64 = 10.0;

/// Wall-clock time spent in each stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub rasterize: Duration,
    pub normalize: Duration,
    pub effects: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.rasterize + self.normalize + self.effects
    }
}

/// The finished raster and how long it took.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub image: RgbaImage,
    pub timings: StageTimings,
}

/// Lay the request's lines out on a single page.
///
/// The first baseline sits `lines * size * spacing` points up the page and
/// each following line one `size * spacing` step lower, so the last line
/// lands one step above the bottom edge.
pub fn build_document(request: &RenderRequest, paper: &str) -> Result<Document> {
    let options = DocumentOptions {
        paper: PaperSize::named_or_default(paper),
        colour_mode: ColourMode::Colour,
        encoding: if request.latin1 {
            Encoding::IsoLatin1
        } else {
            Encoding::Standard
        },
        eps: false,
    };

    let mut doc = Document::new(options);
    doc.new_page()?;
    doc.set_colour(request.foreground)?;
    doc.set_font(&request.font, request.size)?;

    let step = request.size * request.line_spacing;
    let mut y = request.lines.len() as f64 * step;
    for line in &request.lines {
        doc.text(LEFT_MARGIN, y, line, Align::Left, 0.0)?;
        y -= step;
    }

    Ok(doc)
}

/// Normalize a raw raster, then rotate it when requested.
pub fn prepare_raster(raw: &RgbaImage, padding: u32, rotate: bool) -> RgbaImage {
    let img = normalize(raw, padding);
    if rotate {
        imageops::rotate90(&img)
    } else {
        img
    }
}

/// Run every stage from document synthesis to the effect chain.
///
/// Ctrl+C is honoured between stages and between effects, not only while
/// the rasterizer runs.
pub fn run_pipeline(
    request: &RenderRequest,
    config: &Config,
    rasterizer: &dyn Rasterizer,
    workdir: &Path,
) -> Result<PipelineOutput> {
    run_stages(request, config, rasterizer, workdir, interrupted)
}

fn run_stages(
    request: &RenderRequest,
    config: &Config,
    rasterizer: &dyn Rasterizer,
    workdir: &Path,
    stop: impl Fn() -> bool,
) -> Result<PipelineOutput> {
    let check = || {
        if stop() {
            Err(BidetError::Interrupted)
        } else {
            Ok(())
        }
    };

    let mut timings = StageTimings::default();
    let document = build_document(request, &config.settings.paper)?;

    let start = Instant::now();
    let raw = rasterizer.render(&document, workdir)?;
    timings.rasterize = start.elapsed();
    check()?;

    let start = Instant::now();
    let mut image = prepare_raster(&raw, config.settings.padding, request.rotate);
    timings.normalize = start.elapsed();

    let start = Instant::now();
    for effect in request.effects.iter() {
        check()?;
        image = apply_effect(&image, effect);
    }
    timings.effects = start.elapsed();
    check()?;

    Ok(PipelineOutput { image, timings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DrawCommand;
    use crate::external::TerminalColours;
    use crate::document::Document;
    use crate::request::RenderOptions;
    use crate::types::{Colour, Effect, FlipAxis, TileKind};
    use std::cell::Cell;
    use tempfile::tempdir;

    /// Paints a black bar on a white page whatever the document says.
    struct BarRasterizer;

    impl Rasterizer for BarRasterizer {
        fn name(&self) -> &str {
            "bar"
        }

        fn render(&self, _document: &Document, _workdir: &Path) -> Result<RgbaImage> {
            let mut page = RgbaImage::from_pixel(40, 30, image::Rgba([255, 255, 255, 255]));
            for y in 10..15 {
                for x in 5..25 {
                    page.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
                }
            }
            Ok(page)
        }
    }

    fn request(lines: &[&str]) -> RenderRequest {
        let options = RenderOptions::for_lines(lines.iter().map(|s| s.to_string()).collect());
        RenderRequest::resolve(&options, &Config::builtin(), &TerminalColours::default()).unwrap()
    }

    #[test]
    fn test_layout_baselines() {
        let doc = build_document(&request(&["one", "two", "three"]), "A0").unwrap();
        let page = doc.pages().next().unwrap();

        let ys: Vec<f64> = page
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, y, .. } => {
                    assert_eq!(*x, LEFT_MARGIN);
                    Some(*y)
                }
                _ => None,
            })
            .collect();
        assert_eq!(ys, [195.0, 130.0, 65.0]);
    }

    #[test]
    fn test_document_starts_with_colour_and_font() {
        let doc = build_document(&request(&["HI"]), "A0").unwrap();
        let page = doc.pages().next().unwrap();
        assert_eq!(page.commands()[0], DrawCommand::SetColour(Colour::BLACK));
        assert_eq!(
            page.commands()[1],
            DrawCommand::SetFont {
                name: "Helvetica".to_string(),
                size: 65.0
            }
        );
        assert!(doc.to_postscript().contains("%%DocumentMedia: A0"));
    }

    #[test]
    fn test_latin1_document() {
        let doc = build_document(&request(&["naïve"]), "A0").unwrap();
        let ps = doc.to_postscript();
        assert!(ps.contains("/Helvetica-iso findfont"));
        assert!(ps.contains("REENCODEFONT"));
    }

    #[test]
    fn test_prepare_raster_rotates_clockwise() {
        let mut raw = RgbaImage::from_pixel(30, 20, image::Rgba([255, 255, 255, 255]));
        // A 4x2 block: wider than tall.
        for y in 5..7 {
            for x in 5..9 {
                raw.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
            }
        }

        let flat = prepare_raster(&raw, 1, false);
        assert_eq!(flat.dimensions(), (6, 4));

        let turned = prepare_raster(&raw, 1, true);
        assert_eq!(turned.dimensions(), (4, 6));
    }

    /// Ctrl+C arriving after the `n`th check.
    fn stop_after(n: usize) -> impl Fn() -> bool {
        let calls = Cell::new(0);
        move || {
            calls.set(calls.get() + 1);
            calls.get() > n
        }
    }

    fn effect_request() -> RenderRequest {
        let mut req = request(&["HI"]);
        req.effects = req
            .effects
            .with(Effect::flip(FlipAxis::Vertical))
            .with(Effect::tile(TileKind::Grid, 2).unwrap());
        req
    }

    #[test]
    fn test_interrupt_after_rasterize() {
        let dir = tempdir().unwrap();
        let err = run_stages(
            &effect_request(),
            &Config::builtin(),
            &BarRasterizer,
            dir.path(),
            stop_after(0),
        )
        .unwrap_err();
        assert!(matches!(err, BidetError::Interrupted));
    }

    #[test]
    fn test_interrupt_between_effects() {
        let dir = tempdir().unwrap();
        // Rasterize check and the first effect pass, the second effect stops.
        let err = run_stages(
            &effect_request(),
            &Config::builtin(),
            &BarRasterizer,
            dir.path(),
            stop_after(2),
        )
        .unwrap_err();
        assert!(matches!(err, BidetError::Interrupted));
    }

    #[test]
    fn test_uninterrupted_run() {
        let dir = tempdir().unwrap();
        let out = run_stages(
            &effect_request(),
            &Config::builtin(),
            &BarRasterizer,
            dir.path(),
            || false,
        )
        .unwrap();
        // 20x5 bar padded by 10 on each side, tiled 2x2.
        assert_eq!(out.image.dimensions(), (80, 50));
    }
}
