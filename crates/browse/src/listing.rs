//! Raw directory entries, before filtering and presentation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

/// A child of the listed directory or archive.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FileEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
    pub modified: Option<DateTime<Utc>>,
}

/// Reads the direct children of a real directory, sorted by name.
///
/// Metadata follows symlinks. Children whose metadata cannot be read (broken
/// links, permission errors) are skipped.
pub(crate) fn read_dir_entries(dir: &Path) -> std::io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Picks the archive entries directly under `relative`.
///
/// An entry qualifies when it starts with `relative/` (or anything, at the
/// archive root) and has no further `/`. Qualifying entries are leaves: no
/// size, no modification time, never directories.
pub(crate) fn archive_children(entries: &[String], relative: &str) -> Vec<FileEntry> {
    let relative = relative.trim_matches('/');
    let prefix = if relative.is_empty() {
        String::new()
    } else {
        format!("{relative}/")
    };
    let depth = prefix.matches('/').count();

    entries
        .iter()
        .filter(|entry| entry.len() > prefix.len() && entry.starts_with(&prefix))
        .filter(|entry| entry.matches('/').count() <= depth)
        .map(|entry| FileEntry {
            name: entry[prefix.len()..].to_string(),
            size: 0,
            is_dir: false,
            modified: None,
        })
        .collect()
}

/// Splits a file name into stem and extension (with its dot).
///
/// The extension starts at the last dot; `"a.tar.gz"` gives `("a.tar", ".gz")`.
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) => name.split_at(dot),
        None => (name, ""),
    }
}

/// Removes `.` and `..` components without touching the filesystem.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: Vec<FileEntry>) -> Vec<String> {
        entries.into_iter().map(|e| e.name).collect()
    }

    fn archive() -> Vec<String> {
        [
            "a.nes",
            "sub/",
            "sub/b.nes",
            "sub/deep/c.nes",
            "subway.nes",
            "readme.txt",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn archive_root_children() {
        let children = archive_children(&archive(), "");
        assert_eq!(names(children), vec!["a.nes", "subway.nes", "readme.txt"]);
    }

    #[test]
    fn archive_nested_children() {
        let children = archive_children(&archive(), "sub");
        assert_eq!(names(children), vec!["b.nes"]);

        let children = archive_children(&archive(), "sub/");
        assert_eq!(names(children), vec!["b.nes"]);

        let children = archive_children(&archive(), "sub/deep");
        assert_eq!(names(children), vec!["c.nes"]);
    }

    #[test]
    fn archive_children_are_leaves() {
        let children = archive_children(&archive(), "sub");
        assert!(!children[0].is_dir);
        assert_eq!(children[0].size, 0);
        assert!(children[0].modified.is_none());
    }

    #[test]
    fn read_dir_entries_sorted_with_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.nes"), b"12345").unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();

        let entries = read_dir_entries(tmp.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a");
        assert!(entries[0].is_dir);
        assert_eq!(entries[1].size, 5);
        assert!(entries[1].modified.is_some());
    }

    #[test]
    fn read_dir_entries_missing_dir() {
        assert!(read_dir_entries(Path::new("/definitely/not/real")).is_err());
    }

    #[test]
    fn extensions() {
        assert_eq!(split_extension("Mario.nes"), ("Mario", ".nes"));
        assert_eq!(split_extension("a.tar.gz"), ("a.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
    }

    #[test]
    fn normalize_removes_dots() {
        assert_eq!(
            normalize_path(Path::new("/roms/./NES/../SNES/")),
            PathBuf::from("/roms/SNES")
        );
        assert_eq!(
            normalize_path(Path::new("/roms/NES/../../../etc")),
            PathBuf::from("/etc")
        );
    }
}
