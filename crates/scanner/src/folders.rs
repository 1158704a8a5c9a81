//! Discovery of per-system folders under the configured game roots.

use std::fs;
use std::path::{Path, PathBuf};

use romdex_systems::Catalog;
use tracing::debug;

use crate::SystemPaths;

/// Folder name that may hold system folders one level further down.
const NESTED_GAMES_FOLDER: &str = "games";

/// Returns `(system id, folder)` for every child directory of `dir` whose
/// name matches a system. A `games` child is searched the same way.
///
/// A folder shared by several systems is reported once per system. A missing
/// or unreadable `dir` yields nothing.
pub fn find_system_folders(catalog: &Catalog, dir: &Path) -> Vec<(String, PathBuf)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());

    let mut found = Vec::new();
    for entry in entries {
        let path = entry.path();
        // Follow symlinks: a linked system folder counts.
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if name.eq_ignore_ascii_case(NESTED_GAMES_FOLDER) {
            found.extend(find_system_folders(catalog, &path));
        }

        for system in catalog.by_folder(name) {
            debug!(system = %system.id, folder = %path.display(), "found system folder");
            found.push((system.id.clone(), path.clone()));
        }
    }

    found
}

/// Builds the per-system root list from every configured game root, in
/// root order.
///
/// A folder reached twice (a root and its own `games` child both configured)
/// is listed once.
pub fn system_paths(catalog: &Catalog, roots: &[PathBuf]) -> SystemPaths {
    let mut paths = SystemPaths::new();
    for root in roots {
        for (system, folder) in find_system_folders(catalog, root) {
            let folders = paths.entry(system).or_default();
            if !folders.contains(&folder) {
                folders.push(folder);
            }
        }
    }
    paths
}
