//! Virtual paths: `/roms/NES/games.zip/USA/Mario.nes`.

use std::path::Path;

/// Returns true if a file name has a `.zip` suffix (any case).
pub fn is_archive_name(name: &str) -> bool {
    const EXT: &[u8] = b".zip";
    let name = name.as_bytes();
    name.len() >= EXT.len() && name[name.len() - EXT.len()..].eq_ignore_ascii_case(EXT)
}

/// Splits a `/`-separated path at its first segment ending in `.zip` that is
/// not a directory on disk.
///
/// Returns the archive path (inclusive) and the archive-relative remainder,
/// which is empty when `path` names the archive itself. Returns `None` when
/// no segment is an archive.
pub fn split_archive_path(path: &str) -> Option<(&str, &str)> {
    let mut start = 0;
    for segment in path.split('/') {
        let end = start + segment.len();
        if is_archive_name(segment) && !Path::new(&path[..end]).is_dir() {
            let rest = path.get(end + 1..).unwrap_or("");
            return Some((&path[..end], rest));
        }
        start = end + 1;
    }
    None
}
