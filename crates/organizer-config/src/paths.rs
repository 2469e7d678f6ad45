//! Path resolution shared by folder configuration.
//!
//! Resolution mirrors a non-strict `realpath`: `~` expands to `$HOME`, relative
//! paths anchor at the current directory, the longest existing prefix is
//! canonicalized, and any missing remainder is folded lexically.

use std::env;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Resolve `path` to an absolute form suitable for equality checks.
///
/// # Errors
///
/// Returns an error if the path is relative and the current directory cannot
/// be determined.
pub fn resolve_path(path: &Path) -> ConfigResult<PathBuf> {
    let expanded = expand_home(path, env::var_os("HOME"));
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir()
            .map_err(|err| ConfigError::io("paths.current_dir", &expanded, err))?;
        cwd.join(expanded)
    };
    Ok(canonicalize_lenient(&absolute))
}

/// Replace a leading `~` component with `home`, when one is known.
#[must_use]
pub fn expand_home(path: &Path, home: Option<OsString>) -> PathBuf {
    let mut components = path.components();
    match (components.next(), home) {
        (Some(Component::Normal(first)), Some(home)) if first == "~" => {
            PathBuf::from(home).join(components.as_path())
        }
        _ => path.to_path_buf(),
    }
}

fn canonicalize_lenient(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    let mut on_disk = true;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let candidate = resolved.join(name);
                if on_disk && let Ok(canonical) = candidate.canonicalize() {
                    resolved = canonical;
                } else {
                    on_disk = false;
                    resolved = candidate;
                }
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        let home = Some(OsString::from("/home/user"));
        assert_eq!(
            expand_home(Path::new("~/inbox"), home.clone()),
            PathBuf::from("/home/user/inbox")
        );
        assert_eq!(
            expand_home(Path::new("~"), home.clone()),
            PathBuf::from("/home/user")
        );
        assert_eq!(
            expand_home(Path::new("/srv/~/x"), home.clone()),
            PathBuf::from("/srv/~/x")
        );
        assert_eq!(
            expand_home(Path::new("~other/x"), home),
            PathBuf::from("~other/x")
        );
        assert_eq!(
            expand_home(Path::new("~/inbox"), None),
            PathBuf::from("~/inbox")
        );
    }

    #[test]
    fn resolve_folds_parent_components_of_missing_paths() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().canonicalize()?;
        let messy = root.join("missing").join("..").join("other").join(".").join("leaf");
        assert_eq!(resolve_path(&messy)?, root.join("other").join("leaf"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn resolve_follows_symlinks_in_existing_prefix() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().canonicalize()?;
        let target = root.join("target");
        fs::create_dir(&target)?;
        std::os::unix::fs::symlink(&target, root.join("alias"))?;

        assert_eq!(resolve_path(&root.join("alias"))?, target);
        assert_eq!(
            resolve_path(&root.join("alias").join("new"))?,
            target.join("new")
        );
        Ok(())
    }

    #[test]
    fn resolve_anchors_relative_paths_at_current_dir() -> Result<()> {
        let cwd = env::current_dir()?.canonicalize()?;
        let resolved = resolve_path(Path::new("definitely-not-here-organizer"))?;
        assert_eq!(resolved, cwd.join("definitely-not-here-organizer"));
        Ok(())
    }
}
