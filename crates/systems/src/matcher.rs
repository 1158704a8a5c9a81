//! Pure folder and file matching against a [`System`]'s rules.

use std::path::{Component, Path};

use crate::{Catalog, System};

/// Returns true if `dir_name` is one of the system's folder names
/// (case-insensitive).
pub fn matches_system_folder(system: &System, dir_name: &str) -> bool {
    system
        .folders
        .iter()
        .any(|folder| folder.eq_ignore_ascii_case(dir_name))
}

/// Returns true if `path` ends with any extension accepted by the system.
///
/// Works the same for real paths and virtual paths inside an archive.
pub fn matches_system_file(system: &System, path: &str) -> bool {
    system.extensions().any(|ext| has_suffix_ignore_case(path, ext))
}

/// Finds the systems owning `path`: every system accepting the shallowest
/// path component that names a system folder.
///
/// A folder shared by several systems (`SMS`, `GAMEBOY`) yields all of them,
/// in id order. Empty when no component matches.
pub fn systems_for_path<'a>(catalog: &'a Catalog, path: &Path) -> Vec<&'a System> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .map(|name| catalog.by_folder(name))
        .find(|systems| !systems.is_empty())
        .unwrap_or_default()
}

fn has_suffix_ignore_case(value: &str, suffix: &str) -> bool {
    let value = value.as_bytes();
    let suffix = suffix.as_bytes();
    value.len() >= suffix.len() && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Slot;

    fn nes() -> System {
        System::new(
            "NES",
            "NES",
            ["NES", "Famicom"],
            vec![Slot::new("", [".nes"]), Slot::new("FDS", [".fds"])],
        )
    }

    #[test]
    fn folder_match_is_case_insensitive() {
        let system = nes();
        assert!(matches_system_folder(&system, "nes"));
        assert!(matches_system_folder(&system, "FAMICOM"));
        assert!(!matches_system_folder(&system, "SNES"));
        assert!(!matches_system_folder(&system, "NES2"));
    }

    #[test]
    fn file_match_checks_every_slot() {
        let system = nes();
        assert!(matches_system_file(&system, "/roms/NES/Mario.NES"));
        assert!(matches_system_file(&system, "/roms/NES/Zelda.fds"));
        assert!(!matches_system_file(&system, "/roms/NES/readme.txt"));
    }

    #[test]
    fn file_match_on_virtual_path() {
        let system = nes();
        assert!(matches_system_file(&system, "USA/Contra (USA).nes"));
        assert!(!matches_system_file(&system, "USA/"));
    }

    #[test]
    fn suffix_shorter_than_extension() {
        let system = nes();
        assert!(!matches_system_file(&system, "es"));
        assert!(!matches_system_file(&system, ""));
    }

    #[test]
    fn path_match_prefers_shallowest_folder() {
        let catalog = Catalog::new([
            nes(),
            System::new("SNES", "SNES", ["SNES"], vec![Slot::new("", [".sfc"])]),
        ]);

        let ids = |path: &str| -> Vec<String> {
            systems_for_path(&catalog, Path::new(path))
                .into_iter()
                .map(|system| system.id.clone())
                .collect()
        };

        assert_eq!(ids("/media/fat/games/NES/SNES/x"), vec!["NES"]);
        assert_eq!(ids("/media/fat/snes"), vec!["SNES"]);
        assert!(ids("/media/fat/games").is_empty());
    }

    #[test]
    fn path_match_returns_every_system_sharing_the_folder() {
        let catalog = Catalog::new([
            System::new("GameGear", "Game Gear", ["SMS"], vec![Slot::new("", [".gg"])]),
            System::new("MasterSystem", "Master System", ["SMS"], vec![Slot::new("", [".sms"])]),
            nes(),
        ]);

        let found = systems_for_path(&catalog, Path::new("/roms/sms/Sonic.gg"));
        let ids: Vec<&str> = found.iter().map(|system| system.id.as_str()).collect();
        assert_eq!(ids, vec!["GameGear", "MasterSystem"]);
    }
}
