use std::fs::File;
use std::io::Write;
use std::path::Path;

use romdex_systems::{Catalog, Slot, System};
use zip::write::FileOptions;

/// Catalog with a single `Test` system living in `test/` folders and
/// accepting `.ext` files.
pub(crate) fn test_catalog() -> Catalog {
    Catalog::new([
        System::new("Test", "Test", ["test"], vec![Slot::new("", [".ext"])]),
        System::new("Other", "Other", ["other", "shared"], vec![Slot::new("", [".oth"])]),
        System::new("Shared", "Shared", ["shared"], vec![Slot::new("", [".shr"])]),
    ])
}

pub(crate) fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"rom").unwrap();
}

pub(crate) fn write_zip(path: &Path, names: &[&str]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for name in names {
        zip.start_file(*name, options).unwrap();
        zip.write_all(b"rom").unwrap();
    }
    zip.finish().unwrap();
}
