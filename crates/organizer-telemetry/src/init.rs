//! Subscriber installation and log verbosity.
//!
//! # Design
//! - `RUST_LOG` wins when it parses; otherwise the configured verbosity picks
//!   the filter.
//! - The build SHA is recorded once so every span reports the same value.

use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, TelemetryError};

/// Filter used for [`Verbosity::Normal`].
pub const DEFAULT_LOG_LEVEL: &str = "info";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// How much the organizer logs when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    /// Lifecycle and summary events.
    #[default]
    Normal,
    /// Per-file and per-directory detail.
    Verbose,
}

impl Verbosity {
    /// Combine the logging flags; disabling logging overrides verbose output.
    #[must_use]
    pub const fn from_flags(logging_enabled: bool, verbose: bool) -> Self {
        match (logging_enabled, verbose) {
            (false, _) => Self::Quiet,
            (true, true) => Self::Verbose,
            (true, false) => Self::Normal,
        }
    }

    /// `EnvFilter` directive for this verbosity.
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => DEFAULT_LOG_LEVEL,
            Self::Verbose => "debug",
        }
    }
}

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Pretty output for debug builds, JSON for release builds.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Settings for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Fallback verbosity when `RUST_LOG` is absent or invalid.
    pub verbosity: Verbosity,
    /// Output encoding.
    pub format: LogFormat,
    /// Build identifier attached to the process span.
    pub build_sha: &'a str,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            format: LogFormat::infer(),
            build_sha: build_sha(),
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns `TelemetryError::SubscriberInstall` when a global subscriber is
/// already set.
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    let _ = BUILD_SHA.set(config.build_sha.to_string());

    let filter = env_filter(config.verbosity);
    let layer = fmt::layer().with_target(false);
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}

/// Build SHA recorded by [`init_logging`], or `dev` before initialisation.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or("dev", String::as_str)
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.level()))
}
