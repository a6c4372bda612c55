//! The default command: render text to the terminal.

use std::io;
use std::path::Path;
use std::time::Instant;

use crate::config::{Config, Settings};
use crate::error::{BidetError, Result};
use crate::external::{
    probe_terminal, select_encoder, setup_interrupt_handler, Ghostscript, Rasterizer,
    Workspace, DOCUMENT_FILE,
};
use crate::output::{display_path, Printer};
use crate::pipeline::run_pipeline;
use crate::render::write_png;
use crate::request::{RenderRequest, RANDOM};
use crate::text::{layout_lines, TextSource};
use crate::types::EffectSpec;
use crate::validation::{report, validate_options};

use super::{list, Cli};

/// Name of the final raster inside the work directory.
pub const OUTPUT_FILE: &str = "bidet_output.png";

/// Name of the effect chain dump written in debug mode.
pub const EFFECTS_FILE: &str = "effects.json";

/// Keyword that turns `--font`, `--colour` or `--background` into a listing.
const LIST: &str = "list";

pub fn run(cli: Cli, printer: &Printer) -> Result<()> {
    let settings = Settings::discover(cli.config.as_deref())?;
    let config = Config::load(settings)?;

    if cli.font.eq_ignore_ascii_case(LIST) {
        list::fonts(&config);
        return Ok(());
    }
    if cli.colour.eq_ignore_ascii_case(LIST) || cli.background.eq_ignore_ascii_case(LIST) {
        list::colours(&config);
        return Ok(());
    }

    let source = TextSource::from_args(&cli.text);
    let raw = source.read_lines(io::stdin().lock())?;
    let lines = layout_lines(&raw, cli.width, cli.preserve);

    let requested_random = [&cli.font, &cli.colour, &cli.background]
        .iter()
        .any(|s| s.eq_ignore_ascii_case(RANDOM));
    let options = cli
        .render_options(lines)
        .with_random_choices(&config, &mut rand::rng());
    if requested_random {
        printer.debug(
            "Picked",
            &format!(
                "font {}, colour {}, background {}",
                options.font, options.colour, options.background
            ),
        );
    }

    report(&validate_options(&options, &config), printer)?;

    // Ctrl+C kills the process outright until there is a child or a work
    // directory to clean up.
    setup_interrupt_handler()?;

    let terminal = probe_terminal(&config.settings)?;
    let request = RenderRequest::resolve(&options, &config, &terminal)?;

    let rasterizer = Ghostscript::from_settings(&config.settings);
    let workspace = Workspace::create()?;
    in_workspace(workspace, printer, |ws| {
        render(&request, &config, &rasterizer, cli.ansi, ws, printer)
    })
}

/// Run `body` in the work directory, then remove it. In debug mode the
/// directory is kept and reported whether or not `body` succeeded.
fn in_workspace<T>(
    workspace: Workspace,
    printer: &Printer,
    body: impl FnOnce(&Workspace) -> Result<T>,
) -> Result<T> {
    let result = body(&workspace);
    if printer.is_debug() {
        let dir = workspace.keep();
        printer.info("Kept", &printer.cyan(&display_path(&dir)));
    }
    result
}

fn render(
    request: &RenderRequest,
    config: &Config,
    rasterizer: &dyn Rasterizer,
    ansi: bool,
    workspace: &Workspace,
    printer: &Printer,
) -> Result<()> {
    let output = run_pipeline(request, config, rasterizer, workspace.path())?;

    printer.timing("Rendered", DOCUMENT_FILE, output.timings.rasterize);
    printer.timing("Normalized", "raster", output.timings.normalize);
    printer.timing(
        "Composited",
        &format!("{} effect(s)", request.effects.len()),
        output.timings.effects,
    );

    let png = workspace.file(OUTPUT_FILE);
    write_png(&output.image, &png)?;

    let encoder = select_encoder(&config.settings, ansi);
    let start = Instant::now();
    encoder.encode(&png, request.background)?;
    let encode_time = start.elapsed();
    printer.timing("Encoded", encoder.name(), encode_time);

    if printer.is_debug() {
        let effects = workspace.file(EFFECTS_FILE);
        write_effects(&request.effects, &effects)?;
        printer.info("Document", &printer.cyan(&display_path(&workspace.file(DOCUMENT_FILE))));
        printer.info("Image", &printer.cyan(&display_path(&png)));
        printer.info("Effects", &printer.cyan(&display_path(&effects)));
        let (w, h) = output.image.dimensions();
        printer.timing(
            "Finished",
            &format!("{}x{} image", w, h),
            output.timings.total() + encode_time,
        );
    }

    Ok(())
}

/// Dump the effect chain as pretty JSON.
fn write_effects(effects: &EffectSpec, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(effects).map_err(|e| BidetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to serialize effects: {}", e),
    })?;
    std::fs::write(path, json).map_err(|e| BidetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write effects: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::TerminalColours;
    use crate::request::RenderOptions;
    use crate::types::{Effect, FlipAxis, TileKind};
    use tempfile::tempdir;

    fn config_with_rasterizer(program: &str) -> Config {
        Config {
            settings: Settings {
                rasterizer: program.to_string(),
                timeout_secs: 5,
                ..Settings::default()
            },
            ..Config::builtin()
        }
    }

    /// Render "HI" with the configured rasterizer inside a workspace under `parent`.
    fn render_hi(parent: &Path, config: &Config, debug: bool) -> (Result<()>, std::path::PathBuf) {
        let options = RenderOptions::for_lines(vec!["HI".to_string()]);
        let request =
            RenderRequest::resolve(&options, config, &TerminalColours::default()).unwrap();
        let rasterizer = Ghostscript::from_settings(&config.settings);
        let workspace = Workspace::create_in(parent).unwrap();
        let dir = workspace.path().to_path_buf();
        let printer = Printer::with_debug(debug);

        let result = in_workspace(workspace, &printer, |ws| {
            render(&request, config, &rasterizer, false, ws, &printer)
        });
        (result, dir)
    }

    #[cfg(unix)]
    #[test]
    fn test_debug_keeps_workspace_when_rasterizer_fails() {
        let parent = tempdir().unwrap();
        let config = config_with_rasterizer("false");

        let (result, dir) = render_hi(parent.path(), &config, true);

        assert!(matches!(result, Err(BidetError::Tool { .. })));
        assert!(dir.is_dir());
        // The document written before the failure is there to inspect.
        assert!(dir.join(DOCUMENT_FILE).is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_run_removes_workspace() {
        let parent = tempdir().unwrap();
        let config = config_with_rasterizer("false");

        let (result, dir) = render_hi(parent.path(), &config, false);

        assert!(result.is_err());
        assert!(!dir.exists());
    }

    #[test]
    fn test_debug_keeps_workspace_when_rasterizer_is_missing() {
        let parent = tempdir().unwrap();
        let config = config_with_rasterizer("bidet-no-such-rasterizer");

        let (result, dir) = render_hi(parent.path(), &config, true);

        assert!(result.is_err());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_effects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(EFFECTS_FILE);
        let effects = EffectSpec::new()
            .with(Effect::tile(TileKind::Grid, 2).unwrap())
            .with(Effect::flip(FlipAxis::Both));

        write_effects(&effects, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_write_effects_bad_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join(EFFECTS_FILE);
        let err = write_effects(&EffectSpec::new(), &path).unwrap_err();
        assert!(matches!(err, BidetError::Io { .. }));
    }
}
