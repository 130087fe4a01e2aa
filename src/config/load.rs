use std::{env, path::PathBuf};

use url::Url;

use super::schema::{Settings, default_playlists};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `SPINDLE__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SPINDLE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        if settings.playlists.is_empty() {
            settings.playlists = default_playlists();
        }
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if let Err(e) = Url::parse(&self.server.base_url) {
            return Err(format!("server.base_url {:?}: {e}", self.server.base_url));
        }
        if self.server.timeout_ms == 0 {
            return Err("server.timeout_ms must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.unmute_level) {
            return Err("audio.unmute_level must be within 0.0..=1.0".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `SPINDLE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SPINDLE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/spindle/config.toml`, or `~/.config/spindle/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("spindle").join("config.toml"))
}

/// `$XDG_STATE_HOME/spindle/spindle.log`, or `~/.local/state/spindle/spindle.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("spindle").join("spindle.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
