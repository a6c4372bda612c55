//! Render requests.
//!
//! [`RenderOptions`] holds what the user asked for, as given on the command
//! line. [`RenderRequest`] is the resolved form the pipeline consumes: a
//! concrete font face, concrete colours and a validated [`EffectSpec`].

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::Config;
use crate::error::{BidetError, Result};
use crate::external::TerminalColours;
use crate::text::needs_latin1;
use crate::types::{
    Colour, Effect, EffectSpec, FadeKind, FlipAxis, Pattern, PatternSpec, ShadowKind, TileKind,
};

/// Foreground keyword for the terminal's own text colour.
pub const DEFAULT_COLOUR: &str = "default";

/// Background keyword for the terminal's own background.
pub const TRANSPARENT: &str = "transparent";

/// Keyword for a random pick from the font or colour tables.
pub const RANDOM: &str = "random";

/// User choices for a single render, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Laid-out text lines, top to bottom.
    pub lines: Vec<String>,
    pub font: String,
    pub colour: String,
    pub background: String,
    /// Font size in points.
    pub size: u32,
    /// Line spacing as a multiple of the font size.
    pub line_spacing: f64,
    /// Rotate the normalized raster 90° clockwise before effects.
    pub rotate: bool,

    pub flip: Option<FlipAxis>,
    pub colour_spill: Option<(String, String)>,
    pub pattern: Option<Pattern>,
    pub pattern_colours: (String, String),
    pub pattern_scale: u32,
    pub pattern_seed: u64,
    pub tile: Option<TileKind>,
    pub tile_count: u32,
    pub fade: Option<FadeKind>,
    pub fade_amount: f32,
    pub shadow: Option<ShadowKind>,
    pub shadow_offset: u32,
    pub shadow_colour: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            font: "Helvetica".to_string(),
            colour: DEFAULT_COLOUR.to_string(),
            background: TRANSPARENT.to_string(),
            size: 65,
            line_spacing: 1.0,
            rotate: false,
            flip: None,
            colour_spill: None,
            pattern: None,
            pattern_colours: ("white".to_string(), "black".to_string()),
            pattern_scale: 20,
            pattern_seed: 0,
            tile: None,
            tile_count: 3,
            fade: None,
            fade_amount: 0.5,
            shadow: None,
            shadow_offset: 5,
            shadow_colour: "black".to_string(),
        }
    }
}

impl RenderOptions {
    /// Options for rendering `lines` with every other setting at its default.
    pub fn for_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Check if the text needs the Latin-1 re-encoded faces.
    pub fn needs_latin1(&self) -> bool {
        needs_latin1(&self.lines)
    }

    /// Replace `random` font and colour choices with concrete picks.
    pub fn with_random_choices<R: Rng + ?Sized>(mut self, config: &Config, rng: &mut R) -> Self {
        if self.font.eq_ignore_ascii_case(RANDOM) {
            self.font = config.fonts.pick_random(self.needs_latin1(), rng);
        }

        let names: Vec<&str> = config.colours.names().collect();
        for choice in [&mut self.colour, &mut self.background] {
            if choice.eq_ignore_ascii_case(RANDOM) {
                if let Some(name) = names.choose(rng) {
                    *choice = name.to_string();
                }
            }
        }
        self
    }

    /// Every effect colour spec, with the option that names it.
    pub fn effect_colours(&self) -> Vec<(&'static str, &str)> {
        let mut colours = Vec::new();
        if let Some((from, to)) = &self.colour_spill {
            colours.push(("--colorspill", from.as_str()));
            colours.push(("--colorspill", to.as_str()));
        }
        if self.pattern.is_some() {
            colours.push(("--pattern-colors", self.pattern_colours.0.as_str()));
            colours.push(("--pattern-colors", self.pattern_colours.1.as_str()));
        }
        if self.shadow.is_some() {
            colours.push(("--shadow-color", self.shadow_colour.as_str()));
        }
        colours
    }

    /// Build the effect chain. Unknown colours become black.
    pub fn effects(&self, config: &Config) -> Result<EffectSpec> {
        let colour = |spec: &str| config.colours.resolve(spec).unwrap_or(Colour::BLACK);
        let mut effects = EffectSpec::new();

        if let Some(axis) = self.flip {
            effects.insert(Effect::flip(axis));
        }
        if let Some((from, to)) = &self.colour_spill {
            effects.insert(Effect::colour_spill(colour(from), colour(to)));
        }
        if let Some(kind) = self.fade {
            effects.insert(Effect::fade(kind, self.fade_amount)?);
        }
        if let Some(pattern) = self.pattern {
            let (c1, c2) = &self.pattern_colours;
            let spec = PatternSpec::new(pattern, colour(c1), colour(c2), self.pattern_scale)?
                .with_seed(self.pattern_seed);
            effects.insert(Effect::pattern(spec));
        }
        if let Some(kind) = self.shadow {
            effects.insert(Effect::shadow(kind, self.shadow_offset, colour(&self.shadow_colour))?);
        }
        if let Some(kind) = self.tile {
            effects.insert(Effect::tile(kind, self.tile_count)?);
        }

        Ok(effects)
    }
}

/// A fully resolved render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub lines: Vec<String>,
    /// Face name as the rasterizer knows it, `-iso` suffixed for Latin-1 text.
    pub font: String,
    /// Whether the document needs the Latin-1 prologue.
    pub latin1: bool,
    pub foreground: Colour,
    /// Background handed to the terminal encoder.
    pub background: Colour,
    pub size: f64,
    pub line_spacing: f64,
    pub rotate: bool,
    pub effects: EffectSpec,
}

impl RenderRequest {
    /// Resolve options against the configuration and the terminal's colours.
    ///
    /// `random` choices must already have been replaced and the layout
    /// parameters checked by [`validate_options`](crate::validation::validate_options).
    /// The font is resolved here and only here.
    pub fn resolve(
        options: &RenderOptions,
        config: &Config,
        terminal: &TerminalColours,
    ) -> Result<Self> {
        let latin1 = options.needs_latin1();
        let font = config.fonts.resolve(&options.font, latin1)?;

        let (foreground, background) = resolve_pair(options, config, terminal)?;

        Ok(Self {
            lines: options.lines.clone(),
            font,
            latin1,
            foreground,
            background,
            size: options.size as f64,
            line_spacing: options.line_spacing,
            rotate: options.rotate,
            effects: options.effects(config)?,
        })
    }
}

/// Resolve foreground and background, applying the terminal defaults and the
/// white/snow swap that keeps white text from being cleared with the paper.
fn resolve_pair(
    options: &RenderOptions,
    config: &Config,
    terminal: &TerminalColours,
) -> Result<(Colour, Colour)> {
    let is_default = options.colour.eq_ignore_ascii_case(DEFAULT_COLOUR);
    let is_transparent = options.background.eq_ignore_ascii_case(TRANSPARENT);

    let user = |spec: &str, what: &str| {
        config.colours.resolve(spec).ok_or_else(|| BidetError::Config {
            message: format!("Invalid {}: {}", what, spec),
            help: Some("Use --colour list to see colour names, or #RRRRGGGGBBBB".to_string()),
        })
    };

    if !is_default && !is_transparent {
        let fg = user(&options.colour, "colour")?;
        let bg = user(&options.background, "background")?;
        if fg == bg {
            return Err(BidetError::config("Colour and background cannot be the same"));
        }
    }

    let fallback = TerminalColours::default();
    let mut fg_spec = if is_default {
        terminal.foreground.clone()
    } else {
        options.colour.clone()
    };
    let mut bg_spec = if is_transparent {
        terminal.background.clone()
    } else {
        options.background.clone()
    };

    if fg_spec.trim().eq_ignore_ascii_case("white") {
        fg_spec = "snow".to_string();
        if bg_spec.trim().eq_ignore_ascii_case("snow") {
            bg_spec = "white".to_string();
        }
    }

    let foreground = if is_default {
        config
            .colours
            .resolve(&fg_spec)
            .or_else(|| config.colours.resolve(&fallback.foreground))
            .unwrap_or(Colour::BLACK)
    } else {
        user(&fg_spec, "colour")?
    };
    let background = if is_transparent {
        config
            .colours
            .resolve(&bg_spec)
            .or_else(|| config.colours.resolve(&fallback.background))
            .unwrap_or(Colour::WHITE)
    } else {
        user(&bg_spec, "background")?
    };

    Ok((foreground, background))
}
