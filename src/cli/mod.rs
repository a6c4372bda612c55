pub mod completions;
pub mod list;
pub mod render;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::output::Printer;
use crate::request::RenderOptions;
use crate::types::{FadeKind, FlipAxis, Pattern, ShadowKind, TileKind};

/// bidet - Render text as big stylized glyphs in the terminal
#[derive(Parser, Debug)]
#[command(name = "bidet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Text to display, a file to read, or - for stdin
    pub text: Vec<String>,

    /// Use ANSI block output instead of Sixel
    #[arg(short, long)]
    pub ansi: bool,

    /// Background colour ("list" to show names, "random" to pick one)
    #[arg(short, long, default_value = "transparent")]
    pub background: String,

    /// Text colour ("list" to show names, "random" to pick one)
    #[arg(short, long, visible_alias = "color", default_value = "default")]
    pub colour: String,

    /// Keep intermediate files and print timings
    #[arg(short, long)]
    pub debug: bool,

    /// Font face ("list" to show faces, "random" to pick one)
    #[arg(short, long, default_value = "Helvetica")]
    pub font: String,

    /// Line spacing as a multiple of the font size
    #[arg(short, long, default_value_t = 1.0)]
    pub line: f64,

    /// Keep input line breaks instead of refilling
    #[arg(short, long)]
    pub preserve: bool,

    /// Rotate the output right by 90 degrees
    #[arg(short, long)]
    pub rotate: bool,

    /// Font size in points
    #[arg(short, long, default_value_t = 65)]
    pub size: u32,

    /// Refill width in characters
    #[arg(short, long, default_value_t = 20)]
    pub width: usize,

    /// Settings file (default: ./bidet.yaml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Flip the image: horizontal, vertical or both
    #[arg(long, value_name = "AXIS")]
    pub flip: Option<FlipAxis>,

    /// Overlay a vertical gradient between two colours
    #[arg(long, value_name = "COLOR1,COLOR2", value_parser = parse_colour_pair)]
    pub colorspill: Option<(String, String)>,

    /// Put a background pattern behind the text (see --list-patterns)
    #[arg(long, value_name = "PATTERN")]
    pub pattern: Option<Pattern>,

    /// Pattern background and motif colours
    #[arg(long, value_name = "COLOR1,COLOR2", default_value = "white,black", value_parser = parse_colour_pair)]
    pub pattern_colors: (String, String),

    /// Pattern period in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 20)]
    pub pattern_scale: u32,

    /// Seed for the bubbles pattern
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    pub pattern_seed: u64,

    /// List available patterns
    #[arg(long)]
    pub list_patterns: bool,

    /// Tile the image: grid or mirror
    #[arg(long, value_name = "KIND")]
    pub tile: Option<TileKind>,

    /// Tiles per side
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub tile_count: u32,

    /// Fade the image: transparent, white or black
    #[arg(long, value_name = "KIND")]
    pub fade: Option<FadeKind>,

    /// Fade strength from 0.0 to 1.0
    #[arg(long, value_name = "AMOUNT", default_value_t = 0.5)]
    pub fade_amount: f32,

    /// Add a shadow: drop or 3d
    #[arg(long, value_name = "KIND")]
    pub shadow: Option<ShadowKind>,

    /// Shadow offset in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 5)]
    pub shadow_offset: u32,

    /// Shadow colour
    #[arg(long, value_name = "COLOR", default_value = "black")]
    pub shadow_color: String,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Render options for the given laid-out lines.
    pub fn render_options(&self, lines: Vec<String>) -> RenderOptions {
        RenderOptions {
            lines,
            font: self.font.clone(),
            colour: self.colour.clone(),
            background: self.background.clone(),
            size: self.size,
            line_spacing: self.line,
            rotate: self.rotate,
            flip: self.flip,
            colour_spill: self.colorspill.clone(),
            pattern: self.pattern,
            pattern_colours: self.pattern_colors.clone(),
            pattern_scale: self.pattern_scale,
            pattern_seed: self.pattern_seed,
            tile: self.tile,
            tile_count: self.tile_count,
            fade: self.fade,
            fade_amount: self.fade_amount,
            shadow: self.shadow,
            shadow_offset: self.shadow_offset,
            shadow_colour: self.shadow_color.clone(),
        }
    }
}

/// Parse `COLOR1,COLOR2`.
fn parse_colour_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once(',') {
        Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
            Ok((a.trim().to_string(), b.trim().to_string()))
        }
        _ => Err(format!("expected two colours separated by a comma, got '{}'", s)),
    }
}

/// Dispatch to completions, listings or a render.
pub fn run(cli: Cli, printer: &Printer) -> crate::error::Result<()> {
    if let Some(shell) = cli.completions {
        completions::run(shell);
        return Ok(());
    }
    if cli.list_patterns {
        list::patterns();
        return Ok(());
    }
    render::run(cli, printer)
}
