//! # Design
//!
//! - Centralize application-level errors for bootstrap and dispatch.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// No configuration was supplied to a component that requires one.
    #[error("missing configuration")]
    MissingConfig,
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: organizer_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: organizer_telemetry::TelemetryError,
    },
    /// Filesystem watch subscription failed.
    #[error("filesystem watch operation failed")]
    Watch {
        /// Operation identifier.
        operation: &'static str,
        /// Folder involved in the failure, when known.
        path: Option<PathBuf>,
        /// Source notify error.
        source: notify::Error,
    },
    /// A registered task reported a failure.
    #[error("task failed")]
    Task {
        /// Name of the failing task.
        task: &'static str,
        /// Task-provided failure description.
        message: String,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: organizer_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: organizer_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn watch(
        operation: &'static str,
        path: Option<PathBuf>,
        source: notify::Error,
    ) -> Self {
        Self::Watch {
            operation,
            path,
            source,
        }
    }
}
