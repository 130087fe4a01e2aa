use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_spindle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", "/tmp/spindle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/spindle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.config/spindle/config.toml")
    );
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/spindle/spindle.log")
    );
}

#[test]
fn defaults_are_valid_and_carry_playlist_cards() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.ui.notice_ms, 3_000);
    assert_eq!(s.server.manifest, ManifestKind::Listing);
    assert_eq!(s.playlists.first().map(|c| c.key.as_str()), Some("song"));
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "http://music.local:9000"
songs_path = "/media/"
manifest = "json"
manifest_file = "info.json"
extensions = ["mp3", "ogg"]
timeout_ms = 2500

[audio]
unmute_level = 0.25
seek_step_secs = 9

[ui]
header_text = "hello"
notice_ms = 1500
initial_playlist = "chill"

[log]
level = "debug"
file = "/tmp/spindle-test.log"

[[playlists]]
title = "Chill"
key = "chill"
description = "slow ones"

[[playlists]]
title = "Focus"
key = "focus"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SPINDLE__SERVER__TIMEOUT_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "http://music.local:9000");
    assert_eq!(s.server.songs_path, "/media/");
    assert_eq!(s.server.manifest, ManifestKind::Json);
    assert_eq!(s.server.manifest_file, "info.json");
    assert_eq!(s.server.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert_eq!(s.server.timeout_ms, 2500);
    assert_eq!(s.audio.unmute_level, 0.25);
    assert_eq!(s.audio.seek_step_secs, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.notice_ms, 1500);
    assert_eq!(s.ui.initial_playlist, "chill");
    assert_eq!(s.log.level, "debug");
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/spindle-test.log"))
    );
    assert_eq!(
        s.playlists,
        vec![
            PlaylistCard::new("Chill", "chill", "slow ones"),
            PlaylistCard::new("Focus", "focus", ""),
        ]
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
timeout_ms = 2500
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SPINDLE__SERVER__TIMEOUT_MS", "750");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.timeout_ms, 750);
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    s.server.base_url = "not a url".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.server.timeout_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.unmute_level = 1.5;
    assert!(s.validate().is_err());
}
