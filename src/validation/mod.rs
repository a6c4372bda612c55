//! Validation of render options.
//!
//! Runs every check before any external tool is started. Errors abort the
//! render; warnings are printed and the render goes ahead.

mod checks;
mod diagnostic;

pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::config::Config;
use crate::error::{BidetError, Result};
use crate::output::Printer;
use crate::request::RenderOptions;

/// Run all validation checks against the options.
pub fn validate_options(options: &RenderOptions, config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_layout(options));
    result.merge(checks::check_colours(options, config));
    result.merge(checks::check_effect_params(options, config));
    result.merge(checks::check_effect_colours(options, config));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(d.severity.label(), d.is_error());
        eprintln!("{}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }
}

/// Print diagnostics and turn any errors into a single configuration error.
pub fn report(result: &ValidationResult, printer: &Printer) -> Result<()> {
    print_diagnostics(result, printer);

    let mut errors = result.errors();
    let Some(first) = errors.next() else {
        return Ok(());
    };
    let message = match errors.count() {
        0 => first.message.clone(),
        more => format!("{} (and {} more)", first.message, more),
    };
    Err(BidetError::Config {
        message,
        help: None,
    })
}
