use std::path::PathBuf;

use chrono::{DateTime, Utc};
use romdex_systems::System;
use serde::{Deserialize, Serialize};

/// Marker for special listing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A per-system root folder in the top-level listing.
    Folder,
}

/// One entry of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseItem {
    /// File name without its extension.
    pub name: String,
    pub path: String,
    pub parent: String,
    pub filename: String,
    /// Extension including the dot, or empty.
    pub extension: String,
    /// Path to list next when the entry is opened; set for directories and
    /// archives.
    pub next: Option<String>,
    /// Absent for archive entries.
    pub modified: Option<DateTime<Utc>>,
    pub size: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
}

/// A listing of one directory level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseResult {
    /// `None` at the top level, `""` at a system folder (back to the system
    /// list), otherwise the parent directory.
    pub up: Option<String>,
    pub items: Vec<BrowseItem>,
}

/// A discovered per-system root folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemFolder {
    pub system: System,
    pub path: PathBuf,
}
