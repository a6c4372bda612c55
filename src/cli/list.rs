//! Listings for `--font list`, `--colour list` and `--list-patterns`.
//!
//! Listings go to stdout so they can be piped.

use crate::config::Config;
use crate::types::{Pattern, ISO_FONTS};

/// Print collapsed face families: extended faces first, then the
/// Latin-1 capable standard faces.
pub fn fonts(config: &Config) {
    for line in font_lines(config) {
        println!("{}", line);
    }
}

fn font_lines(config: &Config) -> Vec<String> {
    let fonts = &config.fonts;

    let mut regular = fonts.collapse(fonts.extended().iter().map(|s| s.as_str()));
    regular.sort();
    let mut latin1 = fonts.collapse(ISO_FONTS.iter().copied());
    latin1.sort();

    let mut lines = vec!["--- Regular ---".to_string()];
    lines.extend(regular);
    lines.push("--- Latin1 compatible ---".to_string());
    lines.extend(latin1);
    lines
}

/// Print every colour name, sorted.
pub fn colours(config: &Config) {
    for name in config.colours.names() {
        println!("{}", name);
    }
}

/// Print the pattern names accepted by `--pattern`.
pub fn patterns() {
    println!("Available patterns:");
    for pattern in Pattern::ALL {
        println!("  - {}", pattern.name());
    }
}
