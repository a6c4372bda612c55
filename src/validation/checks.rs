//! Validation checks for render options.
//!
//! Each check takes the options and the configuration and returns a
//! `ValidationResult`.

use crate::config::Config;
use crate::error::BidetError;
use crate::request::{RenderOptions, DEFAULT_COLOUR, TRANSPARENT};

use super::diagnostic::{Diagnostic, ValidationResult};

const COLOUR_HELP: &str = "Use --colour list to see colour names, or #RRRRGGGGBBBB";

fn config_diagnostic(code: &'static str, err: BidetError) -> Diagnostic {
    match err {
        BidetError::Config { message, help } => {
            let d = Diagnostic::error(code, message);
            match help {
                Some(help) => d.with_help(help),
                None => d,
            }
        }
        other => Diagnostic::error(code, other.to_string()),
    }
}

/// Check that the text and background colours exist and differ.
pub fn check_colours(options: &RenderOptions, config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    let colour = if options.colour.eq_ignore_ascii_case(DEFAULT_COLOUR) {
        None
    } else {
        let resolved = config.colours.resolve(&options.colour);
        if resolved.is_none() {
            result.push(
                Diagnostic::error(
                    "bidet::validate::unknown-colour",
                    format!("Invalid colour: {}", options.colour),
                )
                .with_help(COLOUR_HELP),
            );
        }
        resolved
    };

    let background = if options.background.eq_ignore_ascii_case(TRANSPARENT) {
        None
    } else {
        let resolved = config.colours.resolve(&options.background);
        if resolved.is_none() {
            result.push(
                Diagnostic::error(
                    "bidet::validate::unknown-colour",
                    format!("Invalid background: {}", options.background),
                )
                .with_help(COLOUR_HELP),
            );
        }
        resolved
    };

    if let (Some(fg), Some(bg)) = (colour, background) {
        if fg == bg {
            result.push(
                Diagnostic::error(
                    "bidet::validate::same-colours",
                    "Colour and background cannot be the same",
                )
                .with_help("The text would be invisible"),
            );
        }
    }

    result
}

/// Check the text layout parameters. Nothing downstream checks them again.
pub fn check_layout(options: &RenderOptions) -> ValidationResult {
    let mut result = ValidationResult::new();

    if options.size == 0 {
        result.error("bidet::validate::size", "Font size must be greater than 0");
    }
    if options.line_spacing.is_nan() || options.line_spacing <= 0.0 {
        result.error(
            "bidet::validate::line-spacing",
            format!("Line spacing must be greater than 0, got {}", options.line_spacing),
        );
    }
    if options.lines.iter().all(|l| l.trim().is_empty()) {
        result.warning("bidet::validate::empty-text", "No text to render");
    }

    result
}

/// Warn about effect colours that will fall back to black.
pub fn check_effect_colours(options: &RenderOptions, config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (flag, spec) in options.effect_colours() {
        if config.colours.resolve(spec).is_none() {
            result.push(
                Diagnostic::warning(
                    "bidet::validate::effect-colour",
                    format!("Unknown colour '{}' for {}, using black", spec, flag),
                )
                .with_help(COLOUR_HELP),
            );
        }
    }

    result
}

/// Check effect parameters against their accepted ranges.
pub fn check_effect_params(options: &RenderOptions, config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();
    if let Err(e) = options.effects(config) {
        result.push(config_diagnostic("bidet::validate::effect", e));
    }
    result
}
