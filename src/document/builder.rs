//! Document builder and serializer.

use std::fmt;
use std::str::FromStr;

use crate::error::{BidetError, Result};
use crate::types::{Colour, PaperSize};

use super::prologue::{self, ISO_LATIN1_ENCODING};

/// How colours are written to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourMode {
    #[default]
    Colour,
    /// Colours are converted to grey with perceptual weights.
    Monochrome,
}

/// Character encoding of the document's fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Standard,
    /// Emit the Latin-1 re-encoding table and the `-iso` faces.
    IsoLatin1,
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Align {
    type Err = BidetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "center" | "centre" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            _ => Err(BidetError::Config {
                message: format!("Unknown alignment: {}", s),
                help: Some("Choose one of: left, center, right".to_string()),
            }),
        }
    }
}

/// Document-wide settings.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    pub paper: PaperSize,
    pub colour_mode: ColourMode,
    pub encoding: Encoding,
    /// Single-page encapsulated output.
    pub eps: bool,
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetColour(Colour),
    SetFont {
        name: String,
        size: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        align: Align,
        rotate: f64,
    },
}

/// A page of draw commands. EPS documents have one page numbered 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: u32,
    commands: Vec<DrawCommand>,
}

impl Page {
    fn new(number: u32) -> Self {
        Self {
            number,
            commands: Vec::new(),
        }
    }

    /// Commands in drawing order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

/// A PostScript document under construction.
#[derive(Debug, Clone)]
pub struct Document {
    options: DocumentOptions,
    /// Closed pages, in order.
    pages: Vec<Page>,
    current: Option<Page>,
    page_count: u32,
}

impl Document {
    /// Create an empty document.
    pub fn new(options: DocumentOptions) -> Self {
        let current = options.eps.then(|| Page::new(0));
        Self {
            options,
            pages: Vec::new(),
            current,
            page_count: 0,
        }
    }

    /// Document settings.
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Close the current page (if any) and start the next one.
    ///
    /// Returns the new page number. EPS documents cannot have pages.
    pub fn new_page(&mut self) -> Result<u32> {
        if self.options.eps {
            return Err(BidetError::Document {
                message: "EPS documents are single-page; new_page is not allowed".to_string(),
            });
        }

        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }

        self.page_count += 1;
        self.current = Some(Page::new(self.page_count));
        Ok(self.page_count)
    }

    /// Set the drawing colour.
    pub fn set_colour(&mut self, colour: Colour) -> Result<()> {
        self.push(DrawCommand::SetColour(colour))
    }

    /// Select a font face and size in points.
    pub fn set_font(&mut self, name: &str, size: f64) -> Result<()> {
        let invalid = name.is_empty()
            || name
                .chars()
                .any(|c| c.is_whitespace() || "()<>[]{}/%".contains(c) || !c.is_ascii());
        if invalid {
            return Err(BidetError::Document {
                message: format!("Invalid font name: {:?}", name),
            });
        }
        if !(size.is_finite() && size > 0.0) {
            return Err(BidetError::Document {
                message: format!("Font size must be positive, got {}", size),
            });
        }

        self.push(DrawCommand::SetFont {
            name: name.to_string(),
            size,
        })
    }

    /// Place a line of text with its anchor at (`x`, `y`).
    ///
    /// `rotate` (degrees) applies to this text only.
    pub fn text(&mut self, x: f64, y: f64, text: &str, align: Align, rotate: f64) -> Result<()> {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            align,
            rotate,
        })
    }

    /// All pages, including the open one.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().chain(self.current.iter())
    }

    /// Number of pages started so far.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    fn push(&mut self, command: DrawCommand) -> Result<()> {
        let page = self.current.as_mut().ok_or_else(|| BidetError::Document {
            message: "No open page; call new_page first".to_string(),
        })?;
        page.commands.push(command);
        Ok(())
    }

    /// Serialize to PostScript source. Open pages are closed in the output.
    pub fn to_postscript(&self) -> String {
        let mut out = PsWriter::default();
        self.write_header(&mut out);

        for page in self.pages() {
            self.write_page(&mut out, page);
        }

        out.line("%%Trailer");
        out.line("%%EOF");
        out.finish()
    }

    /// Serialize to bytes for the rasterizer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_postscript().into_bytes()
    }

    fn write_header(&self, out: &mut PsWriter) {
        let paper = &self.options.paper;

        if self.options.eps {
            out.line("%!PS-Adobe-3.0 EPSF-1.2");
        } else {
            out.line("%!PS-Adobe-3.0");
        }
        out.line("%%Title: (bidet)");
        out.line("%%LanguageLevel: 1");
        out.line("%%Creator: bidet");
        out.line(&format!(
            "%%BoundingBox: 0 0 {} {}",
            paper.width.ceil() as i64,
            paper.height.ceil() as i64
        ));
        if let Some(name) = &paper.name {
            out.line(&format!(
                "%%DocumentMedia: {} {} {} 0 ( ) ( )",
                name,
                fmt_num(paper.width),
                fmt_num(paper.height)
            ));
        }
        if !self.options.eps {
            out.line(&format!("%%Pages: {}", self.page_count));
        }
        out.line("%%EndComments");

        out.line("%%BeginProlog");
        out.line(prologue::LANGUAGE_LEVEL);
        out.line(prologue::BASIC_PROCS);
        if self.options.encoding == Encoding::IsoLatin1 {
            out.line(prologue::LATIN1_ENCODING);
            for face in prologue::reencoded_faces() {
                out.line(&face);
            }
        }
        out.line("%%EndProlog");

        out.line("%%BeginSetup");
        out.line("%%EndSetup");
    }

    fn write_page(&self, out: &mut PsWriter, page: &Page) {
        if !self.options.eps {
            out.line(&format!("%%Page: {} {}", page.number, page.number));
            out.line("%%BeginPageSetup");
            out.line("/pagelevel save def");
            out.line("%%EndPageSetup");
        }

        for command in page.commands() {
            self.write_command(out, command);
        }

        if !self.options.eps {
            out.line("pagelevel restore");
            out.line("showpage");
        }
    }

    fn write_command(&self, out: &mut PsWriter, command: &DrawCommand) {
        match command {
            DrawCommand::SetColour(colour) => {
                let r = round5(colour.r as f64 / 255.0);
                let g = round5(colour.g as f64 / 255.0);
                let b = round5(colour.b as f64 / 255.0);
                match self.options.colour_mode {
                    ColourMode::Colour => out.line(&format!(
                        "{} {} {} setrgbcolor",
                        fmt_num(r),
                        fmt_num(g),
                        fmt_num(b)
                    )),
                    ColourMode::Monochrome => {
                        let grey = round5(0.3 * r + 0.59 * g + 0.11 * b);
                        out.line(&format!("{} setgray", fmt_num(grey)));
                    }
                }
            }
            DrawCommand::SetFont { name, size } => {
                out.line(&format!("/{} findfont {} scalefont setfont", name, fmt_num(*size)));
            }
            DrawCommand::Text {
                x,
                y,
                text,
                align,
                rotate,
            } => {
                let text = escape_text(text);
                out.line("newpath");
                out.line(&format!("{} {} moveto", fmt_num(*x), fmt_num(*y)));
                if *rotate != 0.0 {
                    out.line(&format!("{} rotate", fmt_num(*rotate)));
                }
                match align {
                    Align::Left => out.line(&format!("({}) show", text)),
                    Align::Center => out.line(&format!(
                        "({}) dup stringwidth pop 2 div neg 0 rmoveto show",
                        text
                    )),
                    Align::Right => out.line(&format!(
                        "({}) dup stringwidth pop neg 0 rmoveto show",
                        text
                    )),
                }
                if *rotate != 0.0 {
                    out.line(&format!("{} rotate", fmt_num(-*rotate)));
                }
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_postscript())
    }
}

/// Line-oriented output buffer.
#[derive(Default)]
struct PsWriter {
    buf: String,
}

impl PsWriter {
    fn line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Escape text for a PostScript string literal.
///
/// Latin-1 characters outside ASCII become octal escapes so the document
/// stays 7-bit clean; anything beyond Latin-1 becomes `?`.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

fn round5(v: f64) -> f64 {
    (v * 100_000.0).round() / 100_000.0
}

/// Format a number without trailing zeros (`1`, `0.8`, `841.88976`).
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.5}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
