//! Typed configuration models.
//!
//! # Design
//! - Pure data carriers; construction lives in `folders.rs`, `behavior.rs`, and `loader.rs`.
//! - Fields stay private so values can only exist after validation.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::defaults::{
    ALLOWED_MODES, ALLOWED_MOVE_STRATEGIES, BEHAVIOR_SECTION, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_LOGGING_ENABLED, DEFAULT_STABILIZATION_DELAY, DEFAULT_VERBOSE_CLI,
};
use crate::error::ConfigError;

/// Resolved set of folders the organizer reads from and writes into.
///
/// Every path is absolute and canonical, every directory exists on disk, and
/// no watch folder equals one of the managed folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSet {
    pub(crate) watch_folders: Vec<PathBuf>,
    pub(crate) output_folder: PathBuf,
    pub(crate) temp_folder: PathBuf,
    pub(crate) quarantine_folder: PathBuf,
}

impl FolderSet {
    /// Roots to scan or watch, in configuration order.
    #[must_use]
    pub fn watch_folders(&self) -> &[PathBuf] {
        &self.watch_folders
    }

    /// Destination for organized output.
    #[must_use]
    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    /// Working directory for intermediate artifacts.
    #[must_use]
    pub fn temp_folder(&self) -> &Path {
        &self.temp_folder
    }

    /// Destination for rejected or problematic files.
    #[must_use]
    pub fn quarantine_folder(&self) -> &Path {
        &self.quarantine_folder
    }

    /// Output, temp, and quarantine folders, in that order.
    #[must_use]
    pub fn managed_folders(&self) -> [&Path; 3] {
        [
            self.output_folder.as_path(),
            self.temp_folder.as_path(),
            self.quarantine_folder.as_path(),
        ]
    }

    /// Render the folder set with stringified paths.
    #[must_use]
    pub fn as_json(&self) -> Value {
        json!({
            "watch_folders": self
                .watch_folders
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
            "output_folder": self.output_folder.to_string_lossy(),
            "temp_folder": self.temp_folder.to_string_lossy(),
            "quarantine_folder": self.quarantine_folder.to_string_lossy(),
        })
    }
}

/// Operating mode selected by `behavior.mode_default`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Let the organizer decide; currently behaves like `Dry`.
    Auto,
    /// One-shot scan without monitoring.
    Dry,
    /// Continuous monitoring of the watch folders.
    Active,
}

impl Mode {
    /// Render the mode as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dry => "dry",
            Self::Active => "active",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "dry" => Ok(Self::Dry),
            "active" => Ok(Self::Active),
            other => Err(ConfigError::invalid(
                BEHAVIOR_SECTION,
                "mode_default",
                format!("unsupported mode '{other}'"),
            )),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Strategy a future organize step would use to place files.
///
/// Validated at load time but not acted upon yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MoveStrategy {
    /// Rename into place.
    Move,
    /// Copy and keep the original.
    Copy,
    /// Hard link into place.
    Hardlink,
}

impl MoveStrategy {
    /// Render the strategy as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Hardlink => "hardlink",
        }
    }
}

impl FromStr for MoveStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(Self::Move),
            "copy" => Ok(Self::Copy),
            "hardlink" => Ok(Self::Hardlink),
            other => Err(ConfigError::invalid(
                BEHAVIOR_SECTION,
                "move_strategy",
                format!("unsupported strategy '{other}'"),
            )),
        }
    }
}

/// Validated runtime behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorSettings {
    pub(crate) mode: Mode,
    pub(crate) move_strategy: MoveStrategy,
    pub(crate) confidence_threshold: f64,
    pub(crate) stabilization_delay: Duration,
    pub(crate) logging_enabled: bool,
    pub(crate) verbose_cli: bool,
}

impl BehaviorSettings {
    /// Default execution mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Placement strategy for a future organize step.
    #[must_use]
    pub const fn move_strategy(&self) -> MoveStrategy {
        self.move_strategy
    }

    /// Decision threshold in `[0.0, 1.0]`.
    #[must_use]
    pub const fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Delay before a changed file is considered stable.
    #[must_use]
    pub const fn stabilization_delay(&self) -> Duration {
        self.stabilization_delay
    }

    /// Whether logging output is enabled.
    #[must_use]
    pub const fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Whether verbose console output is requested.
    #[must_use]
    pub const fn verbose_cli(&self) -> bool {
        self.verbose_cli
    }
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            move_strategy: MoveStrategy::Move,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            stabilization_delay: DEFAULT_STABILIZATION_DELAY,
            logging_enabled: DEFAULT_LOGGING_ENABLED,
            verbose_cli: DEFAULT_VERBOSE_CLI,
        }
    }
}

/// Closed sets of accepted values for the enumerated behavior fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRegistry<'a> {
    /// Accepted `mode_default` values.
    pub modes: &'a [&'a str],
    /// Accepted `move_strategy` values.
    pub move_strategies: &'a [&'a str],
}

impl ValueRegistry<'static> {
    /// Registry backed by [`ALLOWED_MODES`] and [`ALLOWED_MOVE_STRATEGIES`].
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            modes: ALLOWED_MODES,
            move_strategies: ALLOWED_MOVE_STRATEGIES,
        }
    }
}

impl Default for ValueRegistry<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Configuration sections reserved for later pipeline stages.
///
/// Values are kept as parsed; nothing validates them yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSections {
    pub(crate) sections: BTreeMap<&'static str, Value>,
}

impl ExtensionSections {
    /// Raw contents of a reserved section, if the document had it.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// Names of the reserved sections present in the document.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.keys().copied()
    }

    /// Whether no reserved section was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_and_formats() {
        assert_eq!("dry".parse::<Mode>().ok(), Some(Mode::Dry));
        assert_eq!("active".parse::<Mode>().ok(), Some(Mode::Active));
        assert_eq!("auto".parse::<Mode>().ok(), Some(Mode::Auto));
        assert!("watch".parse::<Mode>().is_err());
        assert_eq!(Mode::Active.to_string(), "active");
    }

    #[test]
    fn registry_names_parse_into_enums() {
        let registry = ValueRegistry::standard();
        for mode in registry.modes {
            let parsed: Mode = mode.parse().expect("registry mode should parse");
            assert_eq!(parsed.as_str(), *mode);
        }
        for strategy in registry.move_strategies {
            let parsed: MoveStrategy = strategy.parse().expect("registry strategy should parse");
            assert_eq!(parsed.as_str(), *strategy);
        }
    }

    #[test]
    fn default_behavior_matches_documented_values() {
        let settings = BehaviorSettings::default();
        assert_eq!(settings.mode(), Mode::Auto);
        assert_eq!(settings.move_strategy(), MoveStrategy::Move);
        assert!((settings.confidence_threshold() - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.stabilization_delay(), Duration::ZERO);
        assert!(settings.logging_enabled());
        assert!(!settings.verbose_cli());
    }

    #[test]
    fn folder_set_renders_string_paths() {
        let folders = FolderSet {
            watch_folders: vec![PathBuf::from("/data/in")],
            output_folder: PathBuf::from("/data/out"),
            temp_folder: PathBuf::from("/data/out/.tmp"),
            quarantine_folder: PathBuf::from("/data/out/.quarantine"),
        };
        let rendered = folders.as_json();
        assert_eq!(rendered["watch_folders"], json!(["/data/in"]));
        assert_eq!(rendered["temp_folder"], json!("/data/out/.tmp"));
        assert_eq!(folders.managed_folders()[2], Path::new("/data/out/.quarantine"));
    }
}
