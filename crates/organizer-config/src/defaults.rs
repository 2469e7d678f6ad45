//! Default values and allowed-value registries for configuration documents.
//!
//! # Design
//! - Centralize defaults so the loader and the typed models agree.
//! - Keep the allowed-value sets closed; validation checks membership only.

use std::time::Duration;

/// Execution modes accepted for `behavior.mode_default`.
pub const ALLOWED_MODES: &[&str] = &["auto", "dry", "active"];
/// Strategies accepted for `behavior.move_strategy`.
pub const ALLOWED_MOVE_STRATEGIES: &[&str] = &["move", "copy", "hardlink"];

pub(crate) const PATHS_SECTION: &str = "paths";
pub(crate) const BEHAVIOR_SECTION: &str = "behavior";
pub(crate) const DOCUMENT_SECTION: &str = "document";

/// Directory name used for `paths.temp_folder` when omitted.
pub(crate) const DEFAULT_TEMP_DIR: &str = ".tmp";
/// Directory name used for `paths.quarantine_folder` when omitted.
pub(crate) const DEFAULT_QUARANTINE_DIR: &str = ".quarantine";

pub(crate) const DEFAULT_MODE: &str = "auto";
pub(crate) const DEFAULT_MOVE_STRATEGY: &str = "move";
pub(crate) const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;
pub(crate) const DEFAULT_STABILIZATION_DELAY: Duration = Duration::ZERO;
pub(crate) const DEFAULT_LOGGING_ENABLED: bool = true;
pub(crate) const DEFAULT_VERBOSE_CLI: bool = false;

/// Sections that are carried through untouched for future pipeline stages.
pub(crate) const EXTENSION_SECTIONS: &[&str] =
    &["ai", "labels", "api", "logging", "security", "development"];
