use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zip::ZipArchive;

use crate::ArchiveError;

/// Lists the entries of an archive.
///
/// [`ArchiveIndex`](crate::ArchiveIndex) calls this at most once per archive
/// path; implementations do not need to cache.
pub trait ArchiveReader: Send + Sync {
    /// Returns entry paths in central-directory order, `/`-separated.
    fn list_entries(&self, path: &Path) -> Result<Vec<String>, ArchiveError>;
}

/// Reads the central directory of a zip file without decompressing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipReader;

impl ArchiveReader for ZipReader {
    fn list_entries(&self, path: &Path) -> Result<Vec<String>, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let malformed = |source| ArchiveError::Malformed {
            path: path.to_path_buf(),
            source,
        };

        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(malformed)?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(malformed)?;
            entries.push(normalize_entry_name(entry.name()));
        }

        Ok(entries)
    }
}

/// Some archivers write Windows separators into entry names.
fn normalize_entry_name(name: &str) -> String {
    name.replace('\\', "/")
}
