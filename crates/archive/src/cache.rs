use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{ArchiveError, ArchiveReader, ZipReader};

/// Process-wide cache of archive entry lists.
///
/// The first [`list`](Self::list) call for a path reads the archive; every
/// later call returns the same shared list. Lookup and insert happen under a
/// single lock, so an archive is read at most once even when several
/// requests race for it. Failed reads are not cached.
pub struct ArchiveIndex {
    reader: Box<dyn ArchiveReader>,
    entries: Mutex<HashMap<PathBuf, Arc<[String]>>>,
}

impl ArchiveIndex {
    /// Creates an empty index backed by [`ZipReader`].
    pub fn new() -> Self {
        Self::with_reader(ZipReader)
    }

    /// Creates an empty index backed by a custom reader.
    pub fn with_reader(reader: impl ArchiveReader + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the entry list of `archive`, reading it on first use.
    pub fn list(&self, archive: &Path) -> Result<Arc<[String]>, ArchiveError> {
        let mut entries = self.lock();

        if let Some(cached) = entries.get(archive) {
            return Ok(Arc::clone(cached));
        }

        let listed: Arc<[String]> = self.reader.list_entries(archive)?.into();
        debug!(archive = %archive.display(), entries = listed.len(), "indexed archive");
        entries.insert(archive.to_path_buf(), Arc::clone(&listed));

        Ok(listed)
    }

    /// Returns true if `entry` is literally one of the archive's entries.
    pub fn contains(&self, archive: &Path, entry: &str) -> Result<bool, ArchiveError> {
        Ok(self.list(archive)?.iter().any(|name| name == entry))
    }

    /// Drops every cached entry list.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached archives.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Inserts are single map operations, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<[String]>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ArchiveIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ArchiveIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveIndex")
            .field("archives", &self.len())
            .finish()
    }
}
