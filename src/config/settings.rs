//! Settings file (bidet.yaml) parsing.
//!
//! Every field is optional; a missing file or an empty document yields the
//! defaults, which match a standard install.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BidetError, Result};

/// Default location of the font lists.
pub const DEFAULT_DATA_DIR: &str = "/usr/local/share/BIDeT";

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "bidet.yaml";

/// Install and tool settings loaded from bidet.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding fontlist.txt and fontsuffixlist.txt.
    pub data_dir: PathBuf,

    /// Paper size name for the generated document.
    pub paper: String,

    /// Rasterizer resolution in dots per inch.
    pub resolution: u32,

    /// Transparent margin added around the cropped glyphs.
    pub padding: u32,

    /// Limit for each external tool invocation.
    pub timeout_secs: u64,

    /// Rasterizer executable.
    pub rasterizer: String,

    /// Sixel encoder executable.
    pub sixel_encoder: String,

    /// ANSI encoder executable.
    pub ansi_encoder: String,

    /// Terminal probe executable.
    pub probe: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            paper: "A0".to_string(),
            resolution: 150,
            padding: 10,
            timeout_secs: 30,
            rasterizer: "gs".to_string(),
            sixel_encoder: "img2sixel".to_string(),
            ansi_encoder: "img2ans".to_string(),
            probe: "test-sixel".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BidetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load settings from an explicit path, or from `bidet.yaml` in the
    /// working directory when present, or fall back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(SETTINGS_FILE);
                if local.is_file() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self = serde_yaml::from_str(content).map_err(|e| BidetError::Config {
            message: format!("Invalid settings: {}", e),
            help: Some("Check bidet.yaml syntax".to_string()),
        })?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(BidetError::config("resolution must be greater than 0"));
        }
        if self.timeout_secs == 0 {
            return Err(BidetError::config("timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Path of the extended font list.
    pub fn font_list_path(&self) -> PathBuf {
        self.data_dir.join("fontlist.txt")
    }

    /// Path of the font style suffix list.
    pub fn suffix_list_path(&self) -> PathBuf {
        self.data_dir.join("fontsuffixlist.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.paper, "A0");
        assert_eq!(settings.resolution, 150);
        assert_eq!(settings.padding, 10);
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.rasterizer, "gs");
        assert_eq!(
            settings.font_list_path(),
            PathBuf::from("/usr/local/share/BIDeT/fontlist.txt")
        );
    }

    #[test]
    fn test_parse_partial() {
        let settings = Settings::parse("resolution: 300\nansi_encoder: chafa").unwrap();
        assert_eq!(settings.resolution, 300);
        assert_eq!(settings.ansi_encoder, "chafa");
        assert_eq!(settings.sixel_encoder, "img2sixel");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_unknown_field() {
        let err = Settings::parse("colour: red").unwrap_err();
        assert!(matches!(err, BidetError::Config { .. }));
    }

    #[test]
    fn test_parse_rejects_zero_timeout() {
        assert!(Settings::parse("timeout_secs: 0").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bidet.yaml");
        std::fs::write(&path, "data_dir: /opt/bidet\npadding: 4\n").unwrap();

        let settings = Settings::discover(Some(&path)).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/opt/bidet"));
        assert_eq!(settings.padding, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Settings::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, BidetError::Io { .. }));
    }
}
