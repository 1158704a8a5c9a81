//! ROM discovery: find every game file for a system under a set of roots.
//!
//! # Pipeline
//!
//! 1. **Folders**: look for per-system folders under each configured root
//!    (and under a nested `games` folder), see [`system_paths`]
//! 2. **Scan**: walk each system folder, following symlinks and listing zip
//!    archives as if they were directories, see [`Scanner::scan`]
//! 3. **Aggregate**: run every scan, report progress, optionally drop
//!    duplicate titles, see [`Scanner::scan_all`] and [`dedupe_by_base_name`]

mod aggregate;
mod folders;
mod scan;

#[cfg(test)]
mod testutil;

use std::path::PathBuf;

pub use aggregate::{IndexedFile, SystemPaths, dedupe_by_base_name};
pub use folders::{find_system_folders, system_paths};
pub use scan::Scanner;

/// Errors produced while scanning.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    UnknownSystem(#[from] romdex_systems::SystemsError),

    #[error("invalid scan root {}: {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error(transparent)]
    Archive(#[from] romdex_archive::ArchiveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
