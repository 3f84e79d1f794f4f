use std::fs;
use std::path::{Path, PathBuf};

pub mod user;

pub use user::{MpdConfig, Timings, UserConfig};

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("mpd-mirror");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_catalog_path() -> PathBuf {
        Self::get_config_dir().join("catalog.json")
    }

    pub fn get_log_dir() -> PathBuf {
        Self::get_config_dir().join("logs")
    }

    /// Default config as TOML, for `--generate-config`.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&UserConfig::default()).unwrap_or_default()
    }

    /// Load `path`. A missing file is created with defaults; an unreadable
    /// or unparseable one is logged and replaced by defaults in memory.
    pub fn load_from(path: &Path) -> UserConfig {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                    UserConfig::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = UserConfig::default();
                if let Some(parent) = path.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                if let Err(e) = fs::write(path, Self::default_toml()) {
                    tracing::warn!(path = %path.display(), error = %e, "could not write default config");
                }
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                UserConfig::default()
            }
        }
    }
}
