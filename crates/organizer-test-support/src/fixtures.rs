//! Temporary directory trees for filesystem tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Temporary directory that is removed when dropped.
#[derive(Debug)]
pub struct TreeFixture {
    dir: TempDir,
}

impl TreeFixture {
    /// Create an empty fixture root.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to create fixture root")?;
        Ok(Self { dir })
    }

    /// Absolute path of the fixture root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Join `relative` onto the fixture root without touching the disk.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Create a directory (and its parents) below the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn dir(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.path(relative);
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
        Ok(path)
    }

    /// Write `contents` to a file below the root, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the file cannot be written.
    pub fn file(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("failed to write fixture file {}", path.display()))?;
        Ok(path)
    }

    /// Write a file of `size` zero bytes below the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn sized_file(&self, relative: impl AsRef<Path>, size: usize) -> Result<PathBuf> {
        self.file(relative, vec![0_u8; size])
    }
}
