//! Status output for the bidet CLI.
//!
//! Cargo-style lines with a right-aligned coloured verb, written to stderr.
//! stdout carries the terminal image and list output only.

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal. Debug lines are dropped
/// unless the printer was created with `debug` set.
pub struct Printer {
    color: bool,
    debug: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_debug(false)
    }

    /// A printer that also shows debug lines.
    pub fn with_debug(debug: bool) -> Self {
        Self {
            color: io::stderr().is_terminal(),
            debug,
        }
    }

    /// Check if debug lines are shown.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Print a status line with a green bold verb.
    /// e.g. "    Rendered bidet.ps in 0.41s"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a cyan line only in debug mode.
    pub fn debug(&self, verb: &str, message: &str) {
        if self.debug {
            self.print_line(CYAN, verb, message);
        }
    }

    /// Print a stage timing line in debug mode.
    pub fn timing(&self, verb: &str, what: &str, elapsed: Duration) {
        if self.debug {
            let message = format!("{} {}", what, self.dim(&format!("in {}", format_duration(elapsed))));
            self.print_line(GREEN, verb, &message);
        }
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Format a string as cyan (for paths).
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    /// Format a diagnostic severity label with colour.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration as seconds with two decimals: "0.41s".
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
