//! File logger setup.
//!
//! The terminal belongs to the UI, so records only ever go to a file.

use std::path::PathBuf;
use std::time::SystemTime;

use log::LevelFilter;

use crate::config::{LogSettings, default_log_path};

pub fn setup_logger(settings: &LogSettings) -> Result<Option<PathBuf>, fern::InitError> {
    let level = parse_level(&settings.level);
    if level == LevelFilter::Off {
        return Ok(None);
    }

    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ));
        })
        .level_for("symphonia_core", LevelFilter::Warn)
        .level_for("symphonia_bundle_mp3", LevelFilter::Warn)
        .level_for("zbus", LevelFilter::Warn)
        .level_for("tracing::span", LevelFilter::Error)
        .level(level)
        .chain(fern::log_file(&path)?)
        .apply()?;

    Ok(Some(path))
}

/// Unknown names fall back to `info`.
fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}
