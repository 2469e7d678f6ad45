//! YAML-backed configuration loader.
//!
//! # Design
//! - Parse with `serde_yaml` into a `serde_json::Value` tree so validation
//!   helpers work on one representation.
//! - Validate `behavior` before `paths`; folder construction creates
//!   directories and should only run once every cheap check has passed.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::defaults::{BEHAVIOR_SECTION, EXTENSION_SECTIONS, PATHS_SECTION};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{BehaviorSettings, ExtensionSections, FolderSet};

/// Fully validated application configuration.
///
/// Built once at startup and shared by `Arc`; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    folders: FolderSet,
    behavior: BehaviorSettings,
    extensions: ExtensionSections,
    source: Option<PathBuf>,
}

impl AppConfig {
    /// Read and validate the YAML document at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` when the file cannot be read, `Parse` when it
    /// is not valid YAML, and any validation error raised by the sections.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|err| ConfigError::io("loader.read", path, err))?;
        let mut config = Self::from_yaml_str(&text, &path.display().to_string())?;
        config.source = Some(path.to_path_buf());
        debug!(path = %path.display(), "configuration document read");
        Ok(config)
    }

    /// Parse and validate an in-memory YAML document.
    ///
    /// `origin` labels the document in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for YAML syntax errors,
    /// `ConfigError::InvalidDocument` when the top level is not a mapping, and
    /// any validation error raised by the sections.
    pub fn from_yaml_str(text: &str, origin: &str) -> ConfigResult<Self> {
        let document: Value =
            serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        match &document {
            Value::Null => Err(ConfigError::InvalidDocument {
                origin: origin.to_string(),
                reason: "document is empty",
            }),
            Value::Object(_) => Self::from_document(&document),
            _ => Err(ConfigError::InvalidDocument {
                origin: origin.to_string(),
                reason: "top-level must be a mapping",
            }),
        }
    }

    /// Validate an already-parsed document tree.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when `paths` is absent and any
    /// validation error raised by the `paths` or `behavior` sections.
    pub fn from_document(document: &Value) -> ConfigResult<Self> {
        let behavior = BehaviorSettings::from_behavior_section(document.get(BEHAVIOR_SECTION))?;
        let paths = document
            .get(PATHS_SECTION)
            .filter(|section| !section.is_null())
            .ok_or(ConfigError::MissingField {
                section: "document",
                field: PATHS_SECTION,
            })?;
        let folders = FolderSet::from_paths_section(Some(paths))?;

        let sections = EXTENSION_SECTIONS
            .iter()
            .filter_map(|name| document.get(*name).map(|value| (*name, value.clone())))
            .collect();
        let extensions = ExtensionSections { sections };
        debug!(
            sections = ?extensions.names().collect::<Vec<_>>(),
            "extension sections retained"
        );

        Ok(Self {
            folders,
            behavior,
            extensions,
            source: None,
        })
    }

    /// Resolved folder set.
    #[must_use]
    pub const fn folders(&self) -> &FolderSet {
        &self.folders
    }

    /// Validated behavior settings.
    #[must_use]
    pub const fn behavior(&self) -> &BehaviorSettings {
        &self.behavior
    }

    /// Reserved sections carried through unvalidated.
    #[must_use]
    pub const fn extensions(&self) -> &ExtensionSections {
        &self.extensions
    }

    /// File the configuration was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
