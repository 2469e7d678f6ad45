//! Error types for configuration loading and validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
///
/// Every variant is fatal at startup; callers are expected to abort rather
/// than fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document parsed, but its top-level structure is not a mapping.
    #[error("configuration document '{origin}' is invalid: {reason}")]
    InvalidDocument {
        /// File path or label the document was read from.
        origin: String,
        /// Static reason for the failure.
        reason: &'static str,
    },
    /// The document could not be parsed as YAML.
    #[error("failed to parse configuration document '{origin}'")]
    Parse {
        /// File path or label the document was read from.
        origin: String,
        /// Source YAML error.
        source: serde_yaml::Error,
    },
    /// A required field was absent.
    #[error("missing required field '{section}.{field}'")]
    MissingField {
        /// Section that should contain the field.
        section: &'static str,
        /// Name of the missing field.
        field: &'static str,
    },
    /// Field contained an invalid value.
    #[error("invalid value for '{section}.{field}': {message}")]
    InvalidField {
        /// Section that failed validation.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Human-readable error description.
        message: String,
    },
    /// A watch folder resolved to the same directory as a managed folder.
    #[error(
        "watch folder '{}' overlaps the {role} folder '{}'",
        .watch_folder.display(),
        .conflict.display()
    )]
    FolderOverlap {
        /// Resolved watch folder.
        watch_folder: PathBuf,
        /// Role of the conflicting folder (`output`, `temp`, `quarantine`).
        role: &'static str,
        /// Resolved path of the conflicting folder.
        conflict: PathBuf,
    },
    /// File system operation failed.
    #[error("filesystem operation '{operation}' failed for '{}'", .path.display())]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        section: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            section,
            field,
            message: message.into(),
        }
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
