use std::collections::BTreeMap;
use std::path::Path;

use crate::matcher::{matches_system_folder, systems_for_path};
use crate::{Slot, System, SystemsError};

/// Read-only lookup table of supported systems, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    systems: BTreeMap<String, System>,
}

impl Catalog {
    /// Creates a catalog from the given systems. Later duplicates of an id
    /// replace earlier ones.
    pub fn new(systems: impl IntoIterator<Item = System>) -> Self {
        Self {
            systems: systems
                .into_iter()
                .map(|system| (system.id.clone(), system))
                .collect(),
        }
    }

    /// Returns the catalog of systems shipped with romdex.
    pub fn builtin() -> Self {
        Self::new(builtin_systems())
    }

    /// Looks up a system by exact id.
    pub fn get(&self, id: &str) -> Result<&System, SystemsError> {
        self.systems
            .get(id)
            .ok_or_else(|| SystemsError::UnknownSystem(id.to_string()))
    }

    /// Looks up a system by id, ignoring case.
    pub fn lookup(&self, id: &str) -> Result<&System, SystemsError> {
        self.get(id).or_else(|err| {
            self.systems
                .values()
                .find(|system| system.id.eq_ignore_ascii_case(id))
                .ok_or(err)
        })
    }

    /// Iterates systems in id order.
    pub fn systems(&self) -> impl Iterator<Item = &System> {
        self.systems.values()
    }

    /// Returns every system accepting `dir_name` as a folder name, in id order.
    pub fn by_folder(&self, dir_name: &str) -> Vec<&System> {
        self.systems
            .values()
            .filter(|system| matches_system_folder(system, dir_name))
            .collect()
    }

    /// See [`systems_for_path`].
    pub fn systems_for_path(&self, path: &Path) -> Vec<&System> {
        systems_for_path(self, path)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

fn system(id: &str, name: &str, folders: &[&str], slots: Vec<Slot>) -> System {
    System::new(id, name, folders.iter().copied(), slots)
}

fn slot(label: &str, extensions: &[&str]) -> Slot {
    Slot::new(label, extensions.iter().copied())
}

fn builtin_systems() -> Vec<System> {
    vec![
        system("Arcade", "Arcade", &["_Arcade"], vec![slot("", &[".mra"])]),
        system(
            "Atari2600",
            "Atari 2600",
            &["ATARI7800", "Atari2600"],
            vec![slot("", &[".a26"])],
        ),
        system(
            "Atari7800",
            "Atari 7800",
            &["ATARI7800"],
            vec![slot("", &[".a78", ".bin"]), slot("BIOS", &[".rom", ".bin"])],
        ),
        system(
            "C64",
            "Commodore 64",
            &["C64"],
            vec![
                slot("", &[".d64", ".g64", ".t64", ".d81"]),
                slot("", &[".prg", ".crt", ".reu", ".tap"]),
            ],
        ),
        system(
            "ColecoVision",
            "ColecoVision",
            &["Coleco"],
            vec![slot("", &[".col", ".bin", ".rom"]), slot("SG-1000", &[".sg"])],
        ),
        system(
            "GameGear",
            "Game Gear",
            &["SMS", "GameGear"],
            vec![slot("", &[".gg"])],
        ),
        system("Gameboy", "Gameboy", &["GAMEBOY"], vec![slot("", &[".gb"])]),
        system(
            "GameboyColor",
            "Gameboy Color",
            &["GAMEBOY", "GBC"],
            vec![slot("", &[".gbc"])],
        ),
        system("GBA", "Gameboy Advance", &["GBA"], vec![slot("", &[".gba"])]),
        system(
            "Genesis",
            "Genesis",
            &["Genesis", "MegaDrive"],
            vec![slot("", &[".bin", ".gen", ".md"])],
        ),
        system(
            "MegaCD",
            "Sega CD",
            &["MegaCD"],
            vec![slot("", &[".cue", ".chd"])],
        ),
        system("N64", "Nintendo 64", &["N64"], vec![slot("", &[".n64", ".z64"])]),
        system("NeoGeo", "Neo Geo MVS/AES", &["NEOGEO"], vec![slot("", &[".neo"])]),
        system(
            "NES",
            "NES",
            &["NES"],
            vec![slot("", &[".nes"]), slot("FDS", &[".fds"]), slot("NSF", &[".nsf"])],
        ),
        system(
            "PSX",
            "Playstation",
            &["PSX"],
            vec![slot("", &[".cue", ".chd"]), slot("Exe", &[".exe"])],
        ),
        system("MasterSystem", "Master System", &["SMS"], vec![slot("", &[".sms"])]),
        system(
            "SNES",
            "SNES",
            &["SNES"],
            vec![slot("", &[".sfc", ".smc", ".bin", ".bs"]), slot("SPC", &[".spc"])],
        ),
        system(
            "TurboGrafx16",
            "TurboGrafx-16",
            &["TGFX16"],
            vec![slot("", &[".pce", ".bin"]), slot("SuperGrafx", &[".sgx"])],
        ),
    ]
}
