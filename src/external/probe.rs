//! Terminal colour probing.
//!
//! The optional probe helper prints `Sixel support found. fg=<c> bg=<c> nc=<n>`
//! when the terminal answers. Any failure other than Ctrl+C falls back to
//! black on white.

use std::time::Duration;

use crate::config::Settings;
use crate::error::{BidetError, Result};

use super::process::ToolCommand;

/// The terminal's default foreground and background, as colour specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalColours {
    pub foreground: String,
    pub background: String,
}

impl Default for TerminalColours {
    fn default() -> Self {
        Self {
            foreground: "black".to_string(),
            background: "white".to_string(),
        }
    }
}

/// Extract colours from probe output.
pub fn parse_probe_output(output: &str) -> Option<TerminalColours> {
    const MARKER: &str = "Sixel support found.";

    let start = output.find(MARKER)? + MARKER.len();
    let mut foreground = None;
    let mut background = None;
    let mut colours = None;

    for field in output[start..].split_whitespace() {
        if let Some(v) = field.strip_prefix("fg=") {
            foreground.get_or_insert(v);
        } else if let Some(v) = field.strip_prefix("bg=") {
            background.get_or_insert(v);
        } else if let Some(v) = field.strip_prefix("nc=") {
            colours.get_or_insert(v);
        }
    }

    // All three fields must be present for the line to count.
    colours
        .and(foreground.zip(background))
        .map(|(fg, bg)| TerminalColours {
            foreground: fg.to_string(),
            background: bg.to_string(),
        })
}

/// Run the probe helper, falling back to defaults when it is missing or silent.
///
/// Ctrl+C while the helper runs is returned as [`BidetError::Interrupted`].
pub fn probe_terminal(settings: &Settings) -> Result<TerminalColours> {
    let cmd = ToolCommand::new(settings.probe.clone())
        .timeout(Duration::from_secs(settings.timeout_secs));

    colours_from(cmd.output().map(|out| out.stdout))
}

fn colours_from(stdout: Result<Vec<u8>>) -> Result<TerminalColours> {
    match stdout {
        Ok(bytes) => Ok(parse_probe_output(&String::from_utf8_lossy(&bytes)).unwrap_or_default()),
        Err(BidetError::Interrupted) => Err(BidetError::Interrupted),
        Err(_) => Ok(TerminalColours::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_line() {
        let colours =
            parse_probe_output("Sixel support found. fg=#ffffffffffff bg=#000000000000 nc=256\n")
                .unwrap();
        assert_eq!(colours.foreground, "#ffffffffffff");
        assert_eq!(colours.background, "#000000000000");
    }

    #[test]
    fn test_parse_with_preamble() {
        let colours = parse_probe_output("checking...\nSixel support found. fg=grey90 bg=navy nc=16")
            .unwrap();
        assert_eq!(colours.foreground, "grey90");
        assert_eq!(colours.background, "navy");
    }

    #[test]
    fn test_parse_rejects_other_output() {
        assert_eq!(parse_probe_output("No sixel support"), None);
        assert_eq!(parse_probe_output("Sixel support found. fg=black"), None);
    }

    #[test]
    fn test_missing_probe_defaults() {
        let settings = Settings {
            probe: "bidet-no-such-probe".to_string(),
            ..Settings::default()
        };
        assert_eq!(probe_terminal(&settings).unwrap(), TerminalColours::default());
    }

    #[test]
    fn test_interrupt_is_not_a_fallback() {
        let err = colours_from(Err(BidetError::Interrupted)).unwrap_err();
        assert!(matches!(err, BidetError::Interrupted));
    }

    #[test]
    fn test_tool_failures_fall_back() {
        let timeout = Err(BidetError::Timeout {
            tool: "test-sixel".to_string(),
            seconds: 1,
        });
        assert_eq!(colours_from(timeout).unwrap(), TerminalColours::default());
        assert_eq!(
            colours_from(Ok(b"garbage".to_vec())).unwrap(),
            TerminalColours::default()
        );
    }
}
