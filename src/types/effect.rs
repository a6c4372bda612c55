//! Effect definitions for the compositor.
//!
//! Each effect is a variant with its parameters checked on construction.
//! An [`EffectSpec`] holds at most one effect per stage and always yields
//! them in the fixed application order, whatever order they were added in.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BidetError, Result};

use super::Colour;

/// Largest accepted tile count per axis.
pub const MAX_TILE_COUNT: u32 = 16;

/// Largest accepted shadow offset in pixels.
pub const MAX_SHADOW_OFFSET: u32 = 500;

/// Largest accepted pattern scale in pixels.
pub const MAX_PATTERN_SCALE: u32 = 1000;

/// Axis for the flip effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
    Both,
}

/// Target of the fade effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeKind {
    Transparent,
    White,
    Black,
}

/// Shadow style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowKind {
    Drop,
    #[serde(rename = "3d")]
    ThreeD,
}

/// Tiling style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Grid,
    Mirror,
}

/// Procedural background patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Checkerboard,
    Dots,
    Grid,
    Stripes,
    Waves,
    Zigzag,
    Crosshatch,
    Bricks,
    Diamonds,
    Bubbles,
}

impl Pattern {
    /// Every pattern, in listing order.
    pub const ALL: [Pattern; 10] = [
        Pattern::Checkerboard,
        Pattern::Dots,
        Pattern::Grid,
        Pattern::Stripes,
        Pattern::Waves,
        Pattern::Zigzag,
        Pattern::Crosshatch,
        Pattern::Bricks,
        Pattern::Diamonds,
        Pattern::Bubbles,
    ];

    /// The pattern's name.
    pub fn name(self) -> &'static str {
        match self {
            Pattern::Checkerboard => "checkerboard",
            Pattern::Dots => "dots",
            Pattern::Grid => "grid",
            Pattern::Stripes => "stripes",
            Pattern::Waves => "waves",
            Pattern::Zigzag => "zigzag",
            Pattern::Crosshatch => "crosshatch",
            Pattern::Bricks => "bricks",
            Pattern::Diamonds => "diamonds",
            Pattern::Bubbles => "bubbles",
        }
    }

    /// Whether output depends on the seed.
    pub fn is_stochastic(self) -> bool {
        matches!(self, Pattern::Bubbles)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully specified background pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSpec {
    pub pattern: Pattern,
    /// Background fill.
    pub colour1: Colour,
    /// Motif colour.
    pub colour2: Colour,
    /// Pixel period of the repeating motif.
    pub scale: u32,
    /// Seed for stochastic patterns.
    pub seed: u64,
}

impl PatternSpec {
    /// Create a pattern spec with seed 0.
    pub fn new(pattern: Pattern, colour1: Colour, colour2: Colour, scale: u32) -> Result<Self> {
        if scale == 0 || scale > MAX_PATTERN_SCALE {
            return Err(BidetError::Config {
                message: format!("Pattern scale must be 1-{}, got {}", MAX_PATTERN_SCALE, scale),
                help: None,
            });
        }

        Ok(Self {
            pattern,
            colour1,
            colour2,
            scale,
            seed: 0,
        })
    }

    /// Set the seed used by stochastic patterns.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A single compositor effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Mirror the image.
    Flip { axis: FlipAxis },

    /// Translucent vertical two-colour gradient overlay.
    ColourSpill { from: Colour, to: Colour },

    /// Fade towards transparency, white or black.
    Fade { kind: FadeKind, amount: f32 },

    /// Procedural backdrop behind the image.
    Pattern(PatternSpec),

    /// Drop or stacked 3-D shadow.
    Shadow {
        kind: ShadowKind,
        offset: u32,
        colour: Colour,
    },

    /// Replicate the image on a square grid.
    Tile { kind: TileKind, count: u32 },
}

/// Position of an effect in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Flip,
    ColourSpill,
    Fade,
    Pattern,
    Shadow,
    Tile,
}

impl Effect {
    /// Create a flip effect.
    pub fn flip(axis: FlipAxis) -> Self {
        Self::Flip { axis }
    }

    /// Create a colour spill gradient from `from` (top) to `to` (bottom).
    pub fn colour_spill(from: Colour, to: Colour) -> Self {
        Self::ColourSpill { from, to }
    }

    /// Create a fade effect. `amount` must be within 0.0-1.0.
    pub fn fade(kind: FadeKind, amount: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&amount) {
            return Err(BidetError::Config {
                message: format!("Fade amount must be between 0.0 and 1.0, got {}", amount),
                help: None,
            });
        }
        Ok(Self::Fade { kind, amount })
    }

    /// Create a pattern backdrop.
    pub fn pattern(spec: PatternSpec) -> Self {
        Self::Pattern(spec)
    }

    /// Create a shadow effect.
    pub fn shadow(kind: ShadowKind, offset: u32, colour: Colour) -> Result<Self> {
        if offset == 0 || offset > MAX_SHADOW_OFFSET {
            return Err(BidetError::Config {
                message: format!("Shadow offset must be 1-{}, got {}", MAX_SHADOW_OFFSET, offset),
                help: None,
            });
        }
        Ok(Self::Shadow {
            kind,
            offset,
            colour,
        })
    }

    /// Create a tiling effect.
    pub fn tile(kind: TileKind, count: u32) -> Result<Self> {
        if count == 0 || count > MAX_TILE_COUNT {
            return Err(BidetError::Config {
                message: format!("Tile count must be 1-{}, got {}", MAX_TILE_COUNT, count),
                help: None,
            });
        }
        Ok(Self::Tile { kind, count })
    }

    /// The pipeline stage this effect runs in.
    pub fn stage(&self) -> Stage {
        match self {
            Effect::Flip { .. } => Stage::Flip,
            Effect::ColourSpill { .. } => Stage::ColourSpill,
            Effect::Fade { .. } => Stage::Fade,
            Effect::Pattern(_) => Stage::Pattern,
            Effect::Shadow { .. } => Stage::Shadow,
            Effect::Tile { .. } => Stage::Tile,
        }
    }

    /// Get the effect type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Effect::Flip { .. } => "flip",
            Effect::ColourSpill { .. } => "colorspill",
            Effect::Fade { .. } => "fade",
            Effect::Pattern(_) => "pattern",
            Effect::Shadow { .. } => "shadow",
            Effect::Tile { .. } => "tile",
        }
    }
}

/// The set of effects to apply, at most one per stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectSpec {
    effects: BTreeMap<Stage, Effect>,
}

impl EffectSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect, replacing any effect already in its stage.
    pub fn with(mut self, effect: Effect) -> Self {
        self.insert(effect);
        self
    }

    /// Add an effect in place, replacing any effect already in its stage.
    pub fn insert(&mut self, effect: Effect) {
        self.effects.insert(effect.stage(), effect);
    }

    /// Effects in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.values()
    }

    /// Check if there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Get the number of effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }
}

impl Serialize for EffectSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

fn unknown(kind: &str, value: &str, choices: &[&str]) -> BidetError {
    BidetError::Config {
        message: format!("Unknown {}: {}", kind, value),
        help: Some(format!("Choose one of: {}", choices.join(", "))),
    }
}

impl FromStr for FlipAxis {
    type Err = BidetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(FlipAxis::Horizontal),
            "vertical" => Ok(FlipAxis::Vertical),
            "both" => Ok(FlipAxis::Both),
            _ => Err(unknown("flip axis", s, &["horizontal", "vertical", "both"])),
        }
    }
}

impl FromStr for FadeKind {
    type Err = BidetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transparent" => Ok(FadeKind::Transparent),
            "white" => Ok(FadeKind::White),
            "black" => Ok(FadeKind::Black),
            _ => Err(unknown("fade", s, &["transparent", "white", "black"])),
        }
    }
}

impl FromStr for ShadowKind {
    type Err = BidetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(ShadowKind::Drop),
            "3d" => Ok(ShadowKind::ThreeD),
            _ => Err(unknown("shadow", s, &["drop", "3d"])),
        }
    }
}

impl FromStr for TileKind {
    type Err = BidetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(TileKind::Grid),
            "mirror" => Ok(TileKind::Mirror),
            _ => Err(unknown("tile mode", s, &["grid", "mirror"])),
        }
    }
}

impl FromStr for Pattern {
    type Err = BidetError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Pattern::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Pattern::ALL.iter().map(|p| p.name()).collect();
                unknown("pattern", s, &names)
            })
    }
}
