//! Server configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/romdex/server.toml`
//! - Windows: `%APPDATA%/romdex/server.toml`

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Game roots, searched in order for system folders.
    #[serde(default = "default_games_folders")]
    pub games_folders: Vec<PathBuf>,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8182))
}

/// MiSTer storage layout: USB drives, network share, then the SD card.
fn default_games_folders() -> Vec<PathBuf> {
    let mut bases: Vec<String> = (0..=5).map(|n| format!("/media/usb{n}")).collect();
    bases.push("/media/fat/cifs".into());
    bases.push("/media/fat".into());

    bases
        .into_iter()
        .flat_map(|base| {
            let base = PathBuf::from(base);
            let games = base.join("games");
            [base, games]
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            games_folders: default_games_folders(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from `path`, writing a default there if missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the current configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("romdex")
            .join("server.toml"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("romdex").join("server.toml"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/romdex/server.toml"))
    }
}
