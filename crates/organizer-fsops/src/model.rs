//! Discovery data carriers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Metadata captured for one discovered regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Final path component.
    pub filename: String,
    /// Size in bytes at read time.
    pub size_bytes: u64,
    /// Lowercased extension including the leading dot, or empty.
    pub file_type: String,
}

/// Output of a single traversal pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    /// Every directory visited, each recorded once.
    pub directories: Vec<PathBuf>,
    /// Every non-directory entry found below the visited directories.
    pub files: Vec<PathBuf>,
}

impl DiscoveryResult {
    /// Whether the pass found no candidate files.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
