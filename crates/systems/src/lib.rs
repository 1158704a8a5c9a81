//! Supported systems and the rules used to recognise their folders and files.
//!
//! A [`System`] is a game platform with one or more accepted folder names and
//! a list of [`Slot`]s, each carrying the file extensions it accepts. The
//! [`Catalog`] is loaded once at startup and never mutated.

mod catalog;
pub mod matcher;
mod types;

pub use catalog::Catalog;
pub use matcher::{matches_system_file, matches_system_folder, systems_for_path};
pub use types::{Slot, System};

/// Errors produced by catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SystemsError {
    #[error("unknown system: {0}")]
    UnknownSystem(String),
}
