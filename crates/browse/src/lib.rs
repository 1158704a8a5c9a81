//! Interactive browsing of game folders, one level at a time.
//!
//! A listing merges real directory entries and the entries of zip archives,
//! which are presented as pseudo-directories. Only files accepted by the
//! system owning the path are shown.

mod browser;
mod listing;
mod types;

pub use browser::Browser;
pub use types::{BrowseItem, BrowseResult, ItemKind, SystemFolder};

/// Errors produced while browsing.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("no system matches path: {0}")]
    UnknownSystem(String),

    #[error(transparent)]
    Archive(#[from] romdex_archive::ArchiveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
