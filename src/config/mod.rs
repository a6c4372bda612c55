//! Runtime configuration.
//!
//! [`Config`] bundles the settings file with the colour and font tables. It is
//! built once at startup and passed by reference to every stage.

mod settings;

pub use settings::{Settings, DEFAULT_DATA_DIR, SETTINGS_FILE};

use std::io;
use std::path::Path;

use crate::error::{BidetError, Result};
use crate::types::{ColourTable, FontTable};

/// Immutable configuration shared by the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub colours: ColourTable,
    pub fonts: FontTable,
}

impl Config {
    /// Build a configuration, reading the font lists from the data directory.
    pub fn load(settings: Settings) -> Result<Self> {
        let extended = read_list(&settings.font_list_path())?;
        let suffixes = read_list(&settings.suffix_list_path())?;

        Ok(Self {
            settings,
            colours: ColourTable::builtin(),
            fonts: FontTable::new(extended, suffixes),
        })
    }

    /// Configuration with default settings and no extended fonts.
    pub fn builtin() -> Self {
        Self {
            settings: Settings::default(),
            colours: ColourTable::builtin(),
            fonts: FontTable::default(),
        }
    }
}

/// Read a newline-separated list, trimming entries. A missing file is an empty list.
fn read_list(path: &Path) -> Result<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(BidetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read list: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_missing_lists_are_empty() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let config = Config::load(settings).unwrap();
        assert!(config.fonts.extended().is_empty());
        assert!(config.fonts.suffixes().is_empty());
        assert!(!config.colours.is_empty());
    }

    #[test]
    fn test_lists_are_loaded() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("fontlist.txt"), "Palatino-Roman\n\nPalatino-Bold\n").unwrap();
        std::fs::write(dir.path().join("fontsuffixlist.txt"), "Roman\nBold\n").unwrap();

        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let config = Config::load(settings).unwrap();

        assert_eq!(config.fonts.extended(), ["Palatino-Roman", "Palatino-Bold"]);
        assert_eq!(config.fonts.resolve("Palatino", false).unwrap(), "Palatino-Bold");
    }

    #[test]
    fn test_unreadable_list_is_an_error() {
        let dir = tempdir().unwrap();
        // A directory in place of the file cannot be read as text.
        std::fs::create_dir(dir.path().join("fontlist.txt")).unwrap();

        let settings = Settings {
            data_dir: PathBuf::from(dir.path()),
            ..Settings::default()
        };
        assert!(matches!(Config::load(settings), Err(BidetError::Io { .. })));
    }
}
