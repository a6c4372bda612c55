//! Document rasterization through an external interpreter.

use std::path::Path;
use std::time::Duration;

use image::RgbaImage;

use crate::config::Settings;
use crate::document::Document;
use crate::error::{BidetError, Result};
use crate::render::read_png;

use super::process::ToolCommand;

/// Name of the document file written into the work directory.
pub const DOCUMENT_FILE: &str = "bidet.ps";

/// Turns a document into pixels.
pub trait Rasterizer {
    /// Tool name for status output.
    fn name(&self) -> &str;

    /// Rasterize `document`, using `workdir` for intermediate files.
    fn render(&self, document: &Document, workdir: &Path) -> Result<RgbaImage>;
}

/// Write the document into the work directory and return its path.
pub fn write_document(document: &Document, workdir: &Path) -> Result<std::path::PathBuf> {
    let path = workdir.join(DOCUMENT_FILE);
    std::fs::write(&path, document.to_bytes()).map_err(|e| BidetError::Io {
        path: path.clone(),
        message: format!("Failed to write document: {}", e),
    })?;
    Ok(path)
}

/// Ghostscript with the anti-aliased `pngalpha` device.
#[derive(Debug, Clone)]
pub struct Ghostscript {
    program: String,
    resolution: u32,
    timeout: Duration,
}

impl Ghostscript {
    pub fn new(program: impl Into<String>, resolution: u32, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            resolution,
            timeout,
        }
    }

    /// Configure from the settings file.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.rasterizer.clone(),
            settings.resolution,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// The command line for rasterizing `ps` into `png`.
    pub fn command(&self, ps: &Path, png: &Path) -> ToolCommand {
        let mut output = std::ffi::OsString::from("-sOutputFile=");
        output.push(png);

        ToolCommand::new(self.program.clone())
            .arg("-dSAFER")
            .arg("-dBATCH")
            .arg("-dNOPAUSE")
            .arg("-dGraphicsAlphaBits=4")
            .arg("-dTextAlphaBits=4")
            .arg("-sDEVICE=pngalpha")
            .arg(format!("-r{}", self.resolution))
            .arg(output)
            .arg(ps)
            .timeout(self.timeout)
    }
}

impl Rasterizer for Ghostscript {
    fn name(&self) -> &str {
        &self.program
    }

    fn render(&self, document: &Document, workdir: &Path) -> Result<RgbaImage> {
        let ps = write_document(document, workdir)?;
        let png = workdir.join(format!("{}.png", DOCUMENT_FILE));

        self.command(&ps, &png).run()?;

        if !png.is_file() {
            return Err(BidetError::Tool {
                tool: self.program.clone(),
                message: "produced no image".to_string(),
                help: Some("Check that the document has at least one page".to_string()),
            });
        }
        read_png(&png)
    }
}
