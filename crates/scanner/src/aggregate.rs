use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ScanError, Scanner};

/// Root folders to scan, per system id.
pub type SystemPaths = BTreeMap<String, Vec<PathBuf>>;

/// A game file found by [`Scanner::scan_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFile {
    pub system: String,
    pub path: PathBuf,
}

impl AsRef<Path> for IndexedFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl Scanner {
    /// Scans every root of every system.
    ///
    /// `on_progress` is called with the system id and root before each scan.
    /// The first failing scan aborts the whole run.
    pub fn scan_all<F>(
        &self,
        system_paths: &SystemPaths,
        mut on_progress: F,
    ) -> Result<Vec<IndexedFile>, ScanError>
    where
        F: FnMut(&str, &Path),
    {
        let mut files = Vec::new();

        for (system, roots) in system_paths {
            for root in roots {
                on_progress(system, root);

                files.extend(
                    self.scan(system, root)?
                        .into_iter()
                        .map(|path| IndexedFile {
                            system: system.clone(),
                            path,
                        }),
                );
            }
        }

        Ok(files)
    }
}

/// Keeps the first file for each distinct base name, preserving order.
///
/// Collapses the same title found under several systems or folders.
pub fn dedupe_by_base_name<P: AsRef<Path>>(files: impl IntoIterator<Item = P>) -> Vec<P> {
    let mut seen = HashSet::new();
    files
        .into_iter()
        .filter(|file| seen.insert(file.as_ref().file_name().map(|name| name.to_os_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_catalog, touch};
    use romdex_archive::ArchiveIndex;
    use std::sync::Arc;

    fn scanner() -> Scanner {
        Scanner::new(Arc::new(test_catalog()), Arc::new(ArchiveIndex::new()))
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let files = dedupe_by_base_name(["a/x.zip", "b/x.zip", "c/y.zip"]);
        assert_eq!(files, vec!["a/x.zip", "c/y.zip"]);
    }

    #[test]
    fn dedupe_indexed_files() {
        let files = vec![
            IndexedFile {
                system: "Test".into(),
                path: "/roms/test/Game.ext".into(),
            },
            IndexedFile {
                system: "Other".into(),
                path: "/roms/other/Game.ext".into(),
            },
        ];
        let unique = dedupe_by_base_name(files);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].system, "Test");
    }

    #[test]
    fn scan_all_reports_progress_and_tags_system() {
        let tmp = tempfile::tempdir().unwrap();
        let test_root = tmp.path().join("test");
        let other_root = tmp.path().join("other");
        touch(&test_root.join("a.ext"));
        touch(&other_root.join("b.oth"));
        touch(&other_root.join("ignored.ext"));

        let mut paths = SystemPaths::new();
        paths.insert("Test".into(), vec![test_root.clone()]);
        paths.insert("Other".into(), vec![other_root.clone()]);

        let mut progress = Vec::new();
        let files = scanner()
            .scan_all(&paths, |system, root| {
                progress.push((system.to_string(), root.to_path_buf()))
            })
            .unwrap();

        assert_eq!(
            progress,
            vec![
                ("Other".to_string(), other_root.clone()),
                ("Test".to_string(), test_root.clone()),
            ]
        );
        assert_eq!(
            files,
            vec![
                IndexedFile {
                    system: "Other".into(),
                    path: other_root.join("b.oth"),
                },
                IndexedFile {
                    system: "Test".into(),
                    path: test_root.join("a.ext"),
                },
            ]
        );
    }

    #[test]
    fn scan_all_aborts_on_first_error() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good");
        touch(&good.join("a.ext"));

        let mut paths = SystemPaths::new();
        paths.insert("Test".into(), vec![tmp.path().join("missing"), good]);

        let mut calls = 0;
        let result = scanner().scan_all(&paths, |_, _| calls += 1);
        assert!(matches!(result, Err(ScanError::InvalidRoot { .. })));
        assert_eq!(calls, 1);
    }
}
