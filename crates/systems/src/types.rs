use serde::{Deserialize, Serialize};

/// A named group of accepted file extensions.
///
/// Extensions are stored lowercase with a leading dot (`.nes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub extensions: Vec<String>,
}

impl Slot {
    /// Creates a slot, normalising every extension to `.lowercase`.
    pub fn new<I, S>(label: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label: label.into(),
            extensions: extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }
}

/// A supported game platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    pub id: String,
    pub name: String,
    /// Accepted folder names, compared case-insensitively.
    pub folders: Vec<String>,
    pub slots: Vec<Slot>,
}

impl System {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, folders: I, slots: Vec<Slot>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            folders: folders.into_iter().map(Into::into).collect(),
            slots,
        }
    }

    /// Iterates every extension of every slot, in slot order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .flat_map(|slot| slot.extensions.iter().map(String::as_str))
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
