//! Per-file metadata extraction.
//!
//! # Design
//! - `try_read` reports failures as [`FsOpsError`]; `read` logs them and yields `None`.
//! - Symlinks are followed: a link to a regular file reports the target's size.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{FsOpsError, FsOpsResult};
use crate::model::FileRecord;

/// Stateless reader that turns a path into a [`FileRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMetadataReader;

impl FileMetadataReader {
    /// Read metadata for `path`, logging and swallowing any failure.
    ///
    /// Returns `None` when the path is not a regular file or cannot be read.
    #[must_use]
    pub fn read(path: &Path) -> Option<FileRecord> {
        match Self::try_read(path) {
            Ok(record) => record,
            Err(FsOpsError::Io {
                operation,
                path,
                source,
            }) => {
                warn!(
                    operation,
                    error = %source,
                    path = %path.display(),
                    "failed to read file metadata"
                );
                None
            }
        }
    }

    /// Read metadata for `path`.
    ///
    /// Returns `Ok(None)` when the path exists but is not a regular file.
    ///
    /// # Errors
    ///
    /// Returns `FsOpsError::Io` when the path is missing, inaccessible, or
    /// cannot be made absolute.
    pub fn try_read(path: &Path) -> FsOpsResult<Option<FileRecord>> {
        let metadata =
            fs::metadata(path).map_err(|err| FsOpsError::io("metadata.stat", path, err))?;
        if !metadata.is_file() {
            debug!(path = %path.display(), "skipping non-regular file");
            return Ok(None);
        }
        let absolute = std::path::absolute(path)
            .map_err(|err| FsOpsError::io("metadata.absolute", path, err))?;
        let filename = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_type = file_type_of(&absolute);

        Ok(Some(FileRecord {
            path: absolute,
            filename,
            size_bytes: metadata.len(),
            file_type,
        }))
    }
}

/// Lowercased extension with a leading dot, or an empty string.
fn file_type_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
