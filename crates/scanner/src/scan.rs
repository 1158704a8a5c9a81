//! Recursive scan of a system folder.
//!
//! Zip archives are listed through the shared [`ArchiveIndex`] and their
//! matching entries reported as `<archive>/<entry>`. Archives inside archives
//! are not expanded. Symbolic links are followed at every depth; results found
//! behind a link are reported under the link's path, not the target's.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use romdex_archive::{ArchiveIndex, is_archive_name};
use romdex_systems::{Catalog, System, matches_system_file};
use tracing::{debug, info, warn};

use crate::ScanError;

/// Finds game files for a system under a root folder.
#[derive(Debug, Clone)]
pub struct Scanner {
    catalog: Arc<Catalog>,
    archives: Arc<ArchiveIndex>,
}

impl Scanner {
    pub fn new(catalog: Arc<Catalog>, archives: Arc<ArchiveIndex>) -> Self {
        Self { catalog, archives }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns every file under `root` matching the system's extensions.
    /// `system_id` is matched ignoring case.
    ///
    /// If `root` is itself a symlink it is resolved once, and results are
    /// reported under `root`. The order of the returned paths is unspecified.
    pub fn scan(&self, system_id: &str, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let system = self.catalog.lookup(system_id)?;

        let invalid_root = |reason: String| ScanError::InvalidRoot {
            path: root.to_path_buf(),
            reason,
        };

        let root_meta = fs::symlink_metadata(root).map_err(|e| invalid_root(e.to_string()))?;
        let real_root = if root_meta.file_type().is_symlink() {
            resolve_link(root).map_err(|e| invalid_root(e.to_string()))?
        } else {
            root.to_path_buf()
        };

        let is_dir = fs::metadata(&real_root)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(invalid_root("not a directory".into()));
        }

        let mut walk = Walk {
            system,
            archives: &self.archives,
            visited: HashSet::new(),
        };
        let found = walk.dir(&real_root)?;

        let files = if real_root == root {
            found
        } else {
            rebase(found, &real_root, root)
        };

        info!(
            system = %system.id,
            root = %root.display(),
            files = files.len(),
            "scan complete"
        );
        Ok(files)
    }
}

/// State for one top-level scan. Never shared between scans.
struct Walk<'a> {
    system: &'a System,
    archives: &'a ArchiveIndex,
    /// Canonical paths of directories already walked.
    visited: HashSet<PathBuf>,
}

impl Walk<'_> {
    fn dir(&mut self, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let canonical = fs::canonicalize(dir)?;
        if !self.visited.insert(canonical) {
            debug!(dir = %dir.display(), "directory already visited, skipping");
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut found = Vec::new();
        for entry in entries {
            let path = entry.path();
            let file_type = entry.file_type()?;

            if file_type.is_symlink() {
                self.link(&path, &mut found)?;
            } else if file_type.is_dir() {
                found.extend(self.dir(&path)?);
            } else {
                self.file(&path, &mut found)?;
            }
        }

        Ok(found)
    }

    fn link(&mut self, link: &Path, found: &mut Vec<PathBuf>) -> Result<(), ScanError> {
        let target = match resolve_link(link) {
            Ok(target) => target,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(link = %link.display(), "skipping dangling symlink");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if fs::metadata(&target)?.is_dir() {
            let nested = self.dir(&target)?;
            found.extend(rebase(nested, &target, link));
        } else {
            self.file(link, found)?;
        }

        Ok(())
    }

    fn file(&self, path: &Path, found: &mut Vec<PathBuf>) -> Result<(), ScanError> {
        let is_archive = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_archive_name);

        if is_archive {
            let entries = self.archives.list(path)?;
            found.extend(
                entries
                    .iter()
                    .filter(|entry| matches_system_file(self.system, entry))
                    .map(|entry| path.join(entry.trim_start_matches('/'))),
            );
        } else if matches_system_file(self.system, &path.to_string_lossy()) {
            found.push(path.to_path_buf());
        }

        Ok(())
    }
}

/// Resolves a symlink to its canonical target.
///
/// Relative targets are joined onto the directory containing the link; the
/// process working directory is never consulted or changed.
fn resolve_link(link: &Path) -> io::Result<PathBuf> {
    let target = fs::read_link(link)?;
    let target = match link.parent() {
        Some(parent) if target.is_relative() => parent.join(target),
        _ => target,
    };
    fs::canonicalize(target)
}

/// Replaces the `from` prefix of every path with `to`.
fn rebase(paths: Vec<PathBuf>, from: &Path, to: &Path) -> Vec<PathBuf> {
    paths
        .into_iter()
        .map(|path| match path.strip_prefix(from) {
            Ok(rest) => to.join(rest),
            Err(_) => path,
        })
        .collect()
}
