use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::{ArchiveIndex, split_archive_path};

/// Best-effort existence check for real paths and paths inside archives.
#[derive(Debug, Clone)]
pub struct ExistenceResolver {
    index: Arc<ArchiveIndex>,
}

impl ExistenceResolver {
    pub fn new(index: Arc<ArchiveIndex>) -> Self {
        Self { index }
    }

    /// Returns true if `path` exists on disk, or if it has the
    /// `<archive>.zip/<entry>` shape and `entry` is one of the archive's
    /// entries. Never fails: unreadable archives count as missing.
    pub fn exists(&self, path: &Path) -> bool {
        if std::fs::metadata(path).is_ok() {
            return true;
        }

        let Some((archive, entry)) = path.to_str().and_then(split_archive_path) else {
            return false;
        };
        if entry.is_empty() {
            return false;
        }

        match self.index.contains(Path::new(archive), entry) {
            Ok(found) => found,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "archive unreadable, treating as missing");
                false
            }
        }
    }
}
