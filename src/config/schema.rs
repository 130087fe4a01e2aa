use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/spindle/config.toml` or `~/.config/spindle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPINDLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
    /// Playlist cards shown in the left pane, in display order.
    pub playlists: Vec<PlaylistCard>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            audio: AudioSettings::default(),
            ui: UiSettings::default(),
            log: LogSettings::default(),
            playlists: default_playlists(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Origin of the file server hosting the playlists.
    pub base_url: String,
    /// Path under `base_url` where playlist folders live.
    pub songs_path: String,
    /// How a playlist folder describes its tracks.
    pub manifest: ManifestKind,
    /// File name of the JSON manifest inside a playlist folder (`manifest = "json"` only).
    pub manifest_file: String,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Upper bound for any single HTTP request (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            songs_path: "/songs/".to_string(),
            manifest: ManifestKind::Listing,
            manifest_file: "playlist.json".to_string(),
            extensions: vec!["mp3".into()],
            timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestKind {
    /// An HTML directory listing with one anchor per file.
    #[serde(alias = "directory", alias = "html")]
    Listing,
    /// A JSON document with `{"tracks": [{"name": ...}]}` or a bare array.
    #[serde(alias = "manifest")]
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Level restored when un-muting from the volume icon (0.0..=1.0).
    pub unmute_level: f32,
    /// Slider step for the `-` / `+` keys.
    pub volume_step: f32,
    /// Seconds to scrub with the left / right arrow keys.
    pub seek_step_secs: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            unmute_level: 0.1,
            volume_step: 0.05,
            seek_step_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long a notice stays in the banner (milliseconds).
    pub notice_ms: u64,
    /// Playlist key loaded on startup. Empty disables the initial load.
    pub initial_playlist: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ spindle ~ ".to_string(),
            notice_ms: 3_000,
            initial_playlist: "song".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Log file. Defaults to the XDG state directory.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// One selectable playlist.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PlaylistCard {
    pub title: String,
    /// Folder name on the server.
    pub key: String,
    #[serde(default)]
    pub description: String,
}

impl PlaylistCard {
    pub fn new(title: &str, key: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            key: key.to_string(),
            description: description.to_string(),
        }
    }
}

/// Cards used when the config does not list any.
pub fn default_playlists() -> Vec<PlaylistCard> {
    vec![
        PlaylistCard::new("Songs", "song", "Everything in the main folder"),
        PlaylistCard::new("Playlist 1", "playlist1", ""),
        PlaylistCard::new("Playlist 2", "playlist2", ""),
        PlaylistCard::new("Playlist 3", "playlist-3", ""),
    ]
}
