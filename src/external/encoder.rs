//! Terminal image encoders.
//!
//! Encoders write their escape stream straight to our stdout.

use std::path::Path;
use std::time::Duration;

use crate::config::Settings;
use crate::error::Result;
use crate::types::Colour;

use super::process::{StdoutMode, ToolCommand};

/// Converts a PNG into terminal output.
pub trait TerminalEncoder {
    /// Tool name for status output.
    fn name(&self) -> &str;

    /// The command line that encodes `png` over `background`.
    fn command(&self, png: &Path, background: Colour) -> ToolCommand;

    /// Encode `png` to stdout.
    fn encode(&self, png: &Path, background: Colour) -> Result<()> {
        self.command(png, background).run()?;
        Ok(())
    }
}

/// Sixel graphics via `img2sixel`.
#[derive(Debug, Clone)]
pub struct Sixel {
    program: String,
    timeout: Duration,
}

impl Sixel {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.sixel_encoder.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

impl TerminalEncoder for Sixel {
    fn name(&self) -> &str {
        &self.program
    }

    fn command(&self, png: &Path, background: Colour) -> ToolCommand {
        ToolCommand::new(self.program.clone())
            .arg("-I")
            .arg("-B")
            .arg(background.to_hex_rgb())
            .arg(png)
            .timeout(self.timeout)
            .stdout(StdoutMode::Inherit)
    }
}

/// ANSI block characters via `img2ans`.
#[derive(Debug, Clone)]
pub struct Ansi {
    program: String,
    timeout: Duration,
}

impl Ansi {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.ansi_encoder.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

impl TerminalEncoder for Ansi {
    fn name(&self) -> &str {
        &self.program
    }

    fn command(&self, png: &Path, background: Colour) -> ToolCommand {
        ToolCommand::new(self.program.clone())
            .arg("-b")
            .arg(background.to_hex_rgb())
            .arg(png)
            .timeout(self.timeout)
            .stdout(StdoutMode::Inherit)
    }
}

/// Pick the encoder for the requested output mode.
pub fn select_encoder(settings: &Settings, ansi: bool) -> Box<dyn TerminalEncoder> {
    if ansi {
        Box::new(Ansi::from_settings(settings))
    } else {
        Box::new(Sixel::from_settings(settings))
    }
}
