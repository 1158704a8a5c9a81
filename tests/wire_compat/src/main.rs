fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use romdex_browse::{BrowseResult, ItemKind, SystemFolder};
    use romdex_scanner::IndexedFile;
    use romdex_systems::Catalog;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  rust:    {reserialized}"
        );
        parsed
    }

    // --- Browse responses ---

    #[test]
    fn fixture_browse_top_level() {
        let result: BrowseResult = roundtrip_test("browse_top_level.json");
        assert!(result.up.is_none());
        assert!(
            result
                .items
                .iter()
                .all(|item| item.kind == Some(ItemKind::Folder) && item.next.is_some())
        );
    }

    #[test]
    fn fixture_browse_system_folder() {
        let result: BrowseResult = roundtrip_test("browse_system_folder.json");
        assert_eq!(result.up.as_deref(), Some(""));

        // Only directories carry a descend path; archives are listed as files.
        let openable: Vec<_> = result
            .items
            .iter()
            .filter(|item| item.next.is_some())
            .map(|item| item.filename.as_str())
            .collect();
        assert_eq!(openable, vec!["Hacks"]);
        assert!(result.items.iter().all(|item| item.modified.is_some()));
    }

    #[test]
    fn fixture_browse_archive() {
        let result: BrowseResult = roundtrip_test("browse_archive.json");
        let entry = &result.items[0];
        assert!(entry.modified.is_none());
        assert_eq!(entry.size, 0);
        assert!(entry.kind.is_none());
    }

    #[test]
    fn unset_type_is_omitted() {
        let fixture = load_fixture("browse_system_folder.json");
        for item in fixture["items"].as_array().unwrap() {
            assert!(item.get("type").is_none());
        }
    }

    // --- Systems and index ---

    #[test]
    fn fixture_system_folders() {
        let folders: Vec<SystemFolder> = roundtrip_test("system_folders.json");
        assert_eq!(folders[0].system.slots[0].label, "");
    }

    #[test]
    fn fixture_system_matches_builtin_catalog() {
        let folders: Vec<SystemFolder> = roundtrip_test("system_folders.json");
        let catalog = Catalog::builtin();
        let builtin = catalog.get(&folders[0].system.id).unwrap();
        assert_eq!(&folders[0].system, builtin);
    }

    #[test]
    fn fixture_indexed_files() {
        let files: Vec<IndexedFile> = roundtrip_test("indexed_files.json");
        assert_eq!(files.len(), 3);
        assert_eq!(files[2].system, "SNES");
    }

    #[test]
    fn builtin_catalog_serializes() {
        let catalog = Catalog::builtin();
        let systems: Vec<_> = catalog.systems().collect();
        let json = serde_json::to_value(&systems).unwrap();

        for system in json.as_array().unwrap() {
            assert!(system["id"].is_string());
            assert!(!system["folders"].as_array().unwrap().is_empty());
            for slot in system["slots"].as_array().unwrap() {
                for ext in slot["extensions"].as_array().unwrap() {
                    let ext = ext.as_str().unwrap();
                    assert!(ext.starts_with('.'), "extension without dot: {ext}");
                    assert_eq!(ext, ext.to_lowercase());
                }
            }
        }
    }
}
