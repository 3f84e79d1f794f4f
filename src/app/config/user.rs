use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// User-editable configuration (read-only after load)
/// stored in `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Overrides `<config dir>/catalog.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_cache: Option<PathBuf>,
    #[serde(default)]
    pub mpd: MpdConfig,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default)]
    pub keys: crate::app::keys::KeyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MpdConfig {
    pub host: String,
    pub port: u16,
    pub music_directory: String,
}

fn default_music_dir() -> String {
    let home = dirs::home_dir()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string());
    format!("{}/Music", home)
}

impl Default for MpdConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6600,
            music_directory: default_music_dir(),
        }
    }
}

/// Loop and gesture timings ⏱️
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub poll_interval_ms: u64,
    pub settle_delay_ms: u64,
    pub feedback_clear_ms: u64,
    pub keyboard_commit_ms: u64,
    pub seek_step_secs: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            settle_delay_ms: 100,
            feedback_clear_ms: 500,
            keyboard_commit_ms: 500,
            seek_step_secs: 5,
        }
    }
}

impl Timings {
    pub fn poll_interval(&self) -> Duration {
        // A zero interval would spin the poller
        Duration::from_millis(self.poll_interval_ms.max(10))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn feedback_clear(&self) -> Duration {
        Duration::from_millis(self.feedback_clear_ms)
    }

    pub fn keyboard_commit(&self) -> Duration {
        Duration::from_millis(self.keyboard_commit_ms)
    }

    pub fn seek_step(&self) -> f64 {
        self.seek_step_secs as f64
    }
}
