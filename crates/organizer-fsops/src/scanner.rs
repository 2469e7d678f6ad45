//! Directory traversal with exclusion pruning.
//!
//! # Design
//! - Roots are canonicalized before walking and symlinks are never followed, so
//!   every directory path yielded by `walkdir` is already canonical and can be
//!   compared against the canonical exclusion set directly.
//! - Traversal errors are logged and skipped; a scan never fails as a whole.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::model::DiscoveryResult;

/// Number of directories and files echoed at debug level after a scan.
const PREVIEW_LIMIT: usize = 50;

/// Walks watch roots and reports the directories and candidate files found.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Walk every root, skipping any directory whose canonical path is in
    /// `excluded` together with all of its descendants.
    ///
    /// Excluded entries that cannot be canonicalized are compared as given.
    /// Roots that overlap are walked once; a directory reached twice is
    /// recorded once. Symlinks to directories are neither walked nor recorded.
    #[must_use]
    pub fn scan(roots: &[PathBuf], excluded: &[PathBuf]) -> DiscoveryResult {
        let excluded: HashSet<PathBuf> = excluded
            .iter()
            .map(|path| path.canonicalize().unwrap_or_else(|_| path.clone()))
            .collect();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut result = DiscoveryResult::default();

        for root in roots {
            let root = match root.canonicalize() {
                Ok(root) => root,
                Err(err) => {
                    warn!(error = %err, path = %root.display(), "skipping unreadable scan root");
                    continue;
                }
            };
            Self::walk_root(&root, &excluded, &mut visited, &mut result);
        }

        info!(
            roots = roots.len(),
            excluded = excluded.len(),
            directories = result.directories.len(),
            files = result.files.len(),
            "directory scan complete"
        );
        debug!(
            directories = ?preview(&result.directories),
            files = ?preview(&result.files),
            "directory scan preview"
        );
        result
    }

    fn walk_root(
        root: &Path,
        excluded: &HashSet<PathBuf>,
        visited: &mut HashSet<PathBuf>,
        result: &mut DiscoveryResult,
    ) {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                if excluded.contains(entry.path()) {
                    debug!(path = %entry.path().display(), "pruning excluded directory");
                    return false;
                }
                visited.insert(entry.path().to_path_buf())
            });

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => {
                    result.directories.push(entry.into_path());
                }
                Ok(entry) if entry.path_is_symlink() && points_to_dir(entry.path()) => {
                    debug!(path = %entry.path().display(), "skipping directory symlink");
                }
                Ok(entry) => result.files.push(entry.into_path()),
                Err(err) => {
                    let path = err.path().unwrap_or(root);
                    warn!(
                        error = %err,
                        path = %path.display(),
                        depth = err.depth(),
                        "failed to traverse directory entry"
                    );
                }
            }
        }
    }
}

fn points_to_dir(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| metadata.is_dir())
}

fn preview(paths: &[PathBuf]) -> &[PathBuf] {
    &paths[..paths.len().min(PREVIEW_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use organizer_test_support::fixtures::TreeFixture;

    fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.sort();
        paths
    }

    #[test]
    fn counts_every_file_and_directory() -> Result<()> {
        let fixture = TreeFixture::new()?;
        let root = fixture.dir("in")?;
        fixture.file("in/a.txt", "a")?;
        fixture.file("in/sub/b.jpg", "b")?;
        fixture.file("in/sub/deeper/c.pdf", "c")?;
        fixture.dir("in/empty")?;

        let result = DirectoryScanner::scan(&[root.clone()], &[]);
        let root = root.canonicalize()?;
        assert_eq!(
            sorted(result.directories),
            sorted(vec![
                root.clone(),
                root.join("empty"),
                root.join("sub"),
                root.join("sub/deeper"),
            ])
        );
        assert_eq!(result.files.len(), 3);
        Ok(())
    }

    #[test]
    fn excluded_subtree_is_pruned() -> Result<()> {
        let fixture = TreeFixture::new()?;
        let root = fixture.dir("in")?;
        fixture.file("in/keep.txt", "k")?;
        fixture.file("in/a/b/skip/one.txt", "1")?;
        fixture.file("in/a/b/skip/inner/two.txt", "2")?;

        let skipped = root.join("a/b/skip");
        let result = DirectoryScanner::scan(&[root.clone()], &[skipped.clone()]);
        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("keep.txt"));
        let skipped = skipped.canonicalize()?;
        assert!(result.directories.iter().all(|dir| !dir.starts_with(&skipped)));
        assert_eq!(result.directories.len(), 3);
        Ok(())
    }

    #[test]
    fn excluded_root_is_not_visited() -> Result<()> {
        let fixture = TreeFixture::new()?;
        let root = fixture.dir("in")?;
        fixture.file("in/a.txt", "a")?;

        let result = DirectoryScanner::scan(&[root.clone()], &[root]);
        assert!(result.directories.is_empty());
        assert!(result.is_empty());
        Ok(())
    }

    #[test]
    fn missing_root_and_missing_exclusions_are_tolerated() -> Result<()> {
        let fixture = TreeFixture::new()?;
        let root = fixture.dir("in")?;
        fixture.file("in/a.txt", "a")?;

        let result = DirectoryScanner::scan(
            &[fixture.path("missing"), root],
            &[fixture.path("also-missing")],
        );
        assert_eq!(result.directories.len(), 1);
        assert_eq!(result.files.len(), 1);
        Ok(())
    }

    #[test]
    fn overlapping_roots_are_recorded_once() -> Result<()> {
        let fixture = TreeFixture::new()?;
        let outer = fixture.dir("in")?;
        let inner = fixture.dir("in/nested")?;
        fixture.file("in/nested/a.txt", "a")?;

        let result = DirectoryScanner::scan(&[inner, outer], &[]);
        assert_eq!(result.directories.len(), 2);
        assert_eq!(result.files.len(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlinks_are_not_followed() -> Result<()> {
        let fixture = TreeFixture::new()?;
        let root = fixture.dir("in")?;
        let elsewhere = fixture.dir("elsewhere")?;
        fixture.file("elsewhere/hidden.txt", "h")?;
        std::os::unix::fs::symlink(&elsewhere, root.join("link"))?;

        let result = DirectoryScanner::scan(&[root], &[]);
        assert_eq!(result.directories.len(), 1);
        assert!(result.files.is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlinks_are_not_counted_but_file_symlinks_are() -> Result<()> {
        let fixture = TreeFixture::new()?;
        let root = fixture.dir("in")?;
        fixture.file("in/a.txt", "a")?;
        let elsewhere = fixture.dir("elsewhere")?;
        let target = fixture.file("elsewhere/target.txt", "t")?;
        std::os::unix::fs::symlink(&elsewhere, root.join("linkdir"))?;
        std::os::unix::fs::symlink(&target, root.join("linkfile.txt"))?;

        let result = DirectoryScanner::scan(&[root.clone()], &[]);
        let root = root.canonicalize()?;
        assert_eq!(
            sorted(result.files),
            vec![root.join("a.txt"), root.join("linkfile.txt")]
        );
        Ok(())
    }

    #[test]
    fn preview_is_capped() {
        let paths: Vec<PathBuf> = (0..80).map(|i| PathBuf::from(format!("/f{i}"))).collect();
        assert_eq!(preview(&paths).len(), PREVIEW_LIMIT);
        assert_eq!(preview(&paths[..3]).len(), 3);
    }
}
