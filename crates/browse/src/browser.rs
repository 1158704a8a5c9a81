use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use romdex_archive::{ArchiveIndex, split_archive_path};
use romdex_systems::{Catalog, System};
use tracing::{debug, info};

use crate::listing::{FileEntry, archive_children, normalize_path, read_dir_entries, split_extension};
use crate::{BrowseError, BrowseItem, BrowseResult, ItemKind, SystemFolder};

/// Extension that makes a file browsable as a pseudo-directory.
const ARCHIVE_EXTENSION: &str = ".zip";

/// Lists game folders and archives below the configured roots.
#[derive(Debug, Clone)]
pub struct Browser {
    catalog: Arc<Catalog>,
    roots: Vec<PathBuf>,
    archives: Arc<ArchiveIndex>,
}

impl Browser {
    pub fn new(catalog: Arc<Catalog>, roots: Vec<PathBuf>, archives: Arc<ArchiveIndex>) -> Self {
        Self {
            catalog,
            roots,
            archives,
        }
    }

    /// Finds the folder of each system directly under the roots.
    ///
    /// The first match per system wins, in root order and then name order.
    /// Missing or unreadable roots are skipped.
    pub fn system_folders(&self) -> Vec<SystemFolder> {
        let mut seen = HashSet::new();
        let mut folders = Vec::new();

        for root in &self.roots {
            let Ok(entries) = fs::read_dir(root) else {
                continue;
            };
            let mut entries: Vec<_> = entries.flatten().collect();
            entries.sort_by_key(|entry| entry.file_name());

            for entry in entries {
                let path = entry.path();
                if !path.is_dir() {
                    continue;
                }
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    continue;
                };

                for system in self.catalog.by_folder(name) {
                    if seen.insert(system.id.clone()) {
                        folders.push(SystemFolder {
                            system: system.clone(),
                            path: path.clone(),
                        });
                    }
                }
            }
        }

        folders
    }

    /// Lists `path` for navigation.
    ///
    /// An empty path lists the system folders. Any other path must be a
    /// system folder or lie strictly below a configured root.
    pub fn list(&self, path: &str) -> Result<BrowseResult, BrowseError> {
        if path.is_empty() {
            let items = self.system_folders().iter().map(folder_item).collect();
            return Ok(BrowseResult { up: None, items });
        }

        let requested = Path::new(path);
        if !requested.is_absolute() {
            return Err(BrowseError::InvalidPath(path.to_string()));
        }
        let requested = normalize_path(requested);

        // A system folder may be requested with different casing; list the
        // folder as it exists on disk.
        let system_folder = self
            .system_folders()
            .into_iter()
            .find(|folder| same_path_ignore_case(&folder.path, &requested));

        let (target, up) = match system_folder {
            Some(folder) => (folder.path, String::new()),
            None if self.is_below_root(&requested) => {
                let up = requested
                    .parent()
                    .map(|parent| parent.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (requested, up)
            }
            None => return Err(BrowseError::InvalidPath(path.to_string())),
        };

        let items = self.list_one_level(&target)?;
        info!(path = %target.display(), items = items.len(), "listed path");

        Ok(BrowseResult {
            up: Some(up),
            items,
        })
    }

    /// Lists the direct children of `path`, which may point into an archive.
    ///
    /// Files are kept only when their extension is accepted by a system
    /// owning `path`; a folder shared by several systems accepts the
    /// extensions of all of them. Outside archives, zip files are kept as
    /// well. Directories are always kept.
    pub fn list_one_level(&self, path: &Path) -> Result<Vec<BrowseItem>, BrowseError> {
        let systems = self.systems_for(path);
        if systems.is_empty() {
            return Err(BrowseError::UnknownSystem(path.display().to_string()));
        }
        debug!(
            systems = ?systems.iter().map(|system| system.id.as_str()).collect::<Vec<_>>(),
            path = %path.display(),
            "listing"
        );

        let path_str = path.to_string_lossy();
        let (entries, in_archive) = match split_archive_path(&path_str) {
            Some((archive, relative)) => {
                let listed = self.archives.list(Path::new(archive))?;
                (archive_children(&listed, relative), true)
            }
            None => (read_dir_entries(path)?, false),
        };

        let mut accepted: Vec<&str> = systems
            .iter()
            .flat_map(|system| system.extensions())
            .collect();
        if !in_archive {
            accepted.push(ARCHIVE_EXTENSION);
        }

        let items = entries
            .into_iter()
            .filter(|entry| {
                let (_, ext) = split_extension(&entry.name);
                entry.is_dir
                    || accepted
                        .iter()
                        .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
            .map(|entry| entry_item(path, entry))
            .collect();

        Ok(items)
    }

    fn is_below_root(&self, path: &Path) -> bool {
        let is_root = self.roots.iter().any(|root| root.as_path() == path);
        !is_root && self.roots.iter().any(|root| path.starts_with(root))
    }

    /// Matches systems by the path components below the root, falling back
    /// to the whole path when it is outside every root.
    fn systems_for(&self, path: &Path) -> Vec<&System> {
        let relative = self
            .roots
            .iter()
            .filter_map(|root| path.strip_prefix(root).ok())
            .min_by_key(|rest| rest.components().count())
            .unwrap_or(path);
        self.catalog.systems_for_path(relative)
    }
}

fn folder_item(folder: &SystemFolder) -> BrowseItem {
    let path = folder.path.to_string_lossy().into_owned();
    let filename = file_name(&folder.path);
    let (_, extension) = split_extension(&filename);

    BrowseItem {
        name: filename.clone(),
        extension: extension.to_string(),
        filename,
        parent: String::new(),
        next: Some(path.clone()),
        path,
        modified: None,
        size: 0,
        kind: Some(ItemKind::Folder),
    }
}

fn entry_item(parent: &Path, entry: FileEntry) -> BrowseItem {
    let path = parent.join(&entry.name).to_string_lossy().into_owned();
    let (stem, extension) = split_extension(&entry.name);

    BrowseItem {
        name: stem.to_string(),
        extension: extension.to_string(),
        parent: parent.to_string_lossy().into_owned(),
        next: entry.is_dir.then(|| path.clone()),
        path,
        modified: entry.modified,
        size: entry.size,
        kind: None,
        filename: entry.name,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn same_path_ignore_case(a: &Path, b: &Path) -> bool {
    a.to_string_lossy()
        .eq_ignore_ascii_case(&b.to_string_lossy())
}
