//! Zip archives as flat, one-level virtual directories.
//!
//! [`ArchiveIndex`] caches the entry list of every archive it has opened,
//! keyed by the archive's filesystem path. Entries are read from the zip
//! central directory once and reused for the rest of the process; archives
//! are assumed not to change underneath a running server.

mod cache;
mod path;
mod reader;
mod resolver;

use std::path::PathBuf;

pub use cache::ArchiveIndex;
pub use path::{is_archive_name, split_archive_path};
pub use reader::{ArchiveReader, ZipReader};
pub use resolver::ExistenceResolver;

/// Errors produced while reading an archive's directory.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed archive {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}
