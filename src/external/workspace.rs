//! Per-invocation scratch directory.
//!
//! The directory and everything in it are removed when the [`Workspace`] is
//! dropped, on success, on error and after Ctrl+C alike. `--debug` calls
//! [`Workspace::keep`] instead.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{BidetError, Result};

/// Memory-backed temp location preferred on Linux.
const SHM_DIR: &str = "/dev/shm";

const PREFIX: &str = "bidet_";

/// A temporary directory holding the document and intermediate images.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a workspace in `/dev/shm` when available, else the system temp dir.
    pub fn create() -> Result<Self> {
        let shm = Path::new(SHM_DIR);
        if shm.is_dir() {
            if let Ok(ws) = Self::create_in(shm) {
                return Ok(ws);
            }
        }
        Self::create_in(&std::env::temp_dir())
    }

    /// Create a workspace under a specific parent directory.
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(parent)
            .map_err(|e| BidetError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create work directory: {}", e),
            })?;
        Ok(Self { dir })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Keep the directory on disk and return its path.
    #[allow(deprecated)]
    pub fn keep(self) -> PathBuf {
        self.dir.into_path()
    }
}
