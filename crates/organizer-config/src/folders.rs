//! Folder configuration: resolution, directory creation, and overlap checks.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::defaults::{DEFAULT_QUARANTINE_DIR, DEFAULT_TEMP_DIR, PATHS_SECTION};
use crate::error::{ConfigError, ConfigResult};
use crate::model::FolderSet;
use crate::paths::resolve_path;
use crate::validate::{optional_field, parse_path, parse_path_list, section_map};

impl FolderSet {
    /// Build a folder set from the `paths` section of a configuration document.
    ///
    /// `temp_folder` defaults to `<output_folder>/.tmp` and `quarantine_folder`
    /// to `<output_folder>/.quarantine`. Every folder is created if missing.
    /// Paths are resolved first, directories created second, and the overlap
    /// check runs last against canonical paths.
    ///
    /// # Errors
    ///
    /// Returns an error if `watch_folders` or `output_folder` is missing or
    /// malformed, if a directory cannot be created, or if a watch folder
    /// resolves to the output, temp, or quarantine folder.
    pub fn from_paths_section(section: Option<&Value>) -> ConfigResult<Self> {
        let fields = section_map(section, PATHS_SECTION)?;

        let raw_watch = optional_field(fields, "watch_folders").ok_or(ConfigError::MissingField {
            section: PATHS_SECTION,
            field: "watch_folders",
        })?;
        let raw_output = optional_field(fields, "output_folder").ok_or(ConfigError::MissingField {
            section: PATHS_SECTION,
            field: "output_folder",
        })?;

        let watch_folders = parse_path_list(raw_watch, PATHS_SECTION, "watch_folders")?
            .iter()
            .map(|path| resolve_path(path))
            .collect::<ConfigResult<Vec<_>>>()?;
        let output_folder = resolve_path(&parse_path(raw_output, PATHS_SECTION, "output_folder")?)?;
        let temp_folder = resolve_path(&optional_path(
            optional_field(fields, "temp_folder"),
            "temp_folder",
            || output_folder.join(DEFAULT_TEMP_DIR),
        )?)?;
        let quarantine_folder = resolve_path(&optional_path(
            optional_field(fields, "quarantine_folder"),
            "quarantine_folder",
            || output_folder.join(DEFAULT_QUARANTINE_DIR),
        )?)?;

        let folders = Self {
            watch_folders,
            output_folder,
            temp_folder,
            quarantine_folder,
        };
        let folders = folders.materialize()?;
        folders.ensure_disjoint()?;
        Ok(folders)
    }

    /// Create every folder and re-read its canonical location.
    fn materialize(self) -> ConfigResult<Self> {
        let Self {
            watch_folders,
            output_folder,
            temp_folder,
            quarantine_folder,
        } = self;

        Ok(Self {
            watch_folders: watch_folders
                .iter()
                .map(|path| create_and_canonicalize(path))
                .collect::<ConfigResult<Vec<_>>>()?,
            output_folder: create_and_canonicalize(&output_folder)?,
            temp_folder: create_and_canonicalize(&temp_folder)?,
            quarantine_folder: create_and_canonicalize(&quarantine_folder)?,
        })
    }

    fn ensure_disjoint(&self) -> ConfigResult<()> {
        let managed = [
            ("output", &self.output_folder),
            ("temp", &self.temp_folder),
            ("quarantine", &self.quarantine_folder),
        ];
        for watch_folder in &self.watch_folders {
            if let Some((role, conflict)) = managed.iter().find(|(_, path)| *path == watch_folder) {
                return Err(ConfigError::FolderOverlap {
                    watch_folder: watch_folder.clone(),
                    role: *role,
                    conflict: (*conflict).clone(),
                });
            }
        }
        Ok(())
    }
}

fn optional_path(
    value: Option<&Value>,
    field: &'static str,
    default: impl FnOnce() -> PathBuf,
) -> ConfigResult<PathBuf> {
    value.map_or_else(|| Ok(default()), |raw| parse_path(raw, PATHS_SECTION, field))
}

fn create_and_canonicalize(path: &Path) -> ConfigResult<PathBuf> {
    fs::create_dir_all(path).map_err(|err| ConfigError::io("folders.create_dir", path, err))?;
    let canonical = path
        .canonicalize()
        .map_err(|err| ConfigError::io("folders.canonicalize", path, err))?;
    debug!(path = %canonical.display(), "folder ready");
    Ok(canonical)
}
