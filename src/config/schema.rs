use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/vivace/config.toml` or `~/.config/vivace/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VIVACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub player: PlayerSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library: LibrarySettings::default(),
            player: PlayerSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File the library list is persisted to, one path per line.
    /// Relative paths are resolved against the working directory.
    pub media_file: PathBuf,
    /// File extensions to treat as media (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when importing folders.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            media_file: PathBuf::from("media/library.txt"),
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "ogg".into(),
                "flac".into(),
                "aac".into(),
            ],
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Startup volume in percent (0-100).
    pub default_volume: u8,
    /// Number of seconds one scrub step moves the position slider.
    pub seek_step_secs: u64,
    /// Wall-clock interval between position sync ticks (milliseconds).
    pub sync_interval_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            default_volume: 100,
            seek_step_secs: 5,
            sync_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Volume change applied per volume key press (percent).
    pub volume_step: u8,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ vivace ~ ".to_string(),
            volume_step: 5,
        }
    }
}
