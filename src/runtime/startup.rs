use crate::config;
use crate::logging;

/// Start the file logger and replay warnings gathered before it existed.
pub fn start_logging(settings: &config::Settings, warnings: &[String]) {
    for w in warnings {
        eprintln!("spindle: {w}");
    }

    match logging::setup_logger(&settings.log) {
        Ok(Some(path)) => log::info!("spindle starting, logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("spindle: logging disabled: {e}"),
    }

    for w in warnings {
        log::warn!("{w}");
    }
    log::info!(
        "server {} (songs at {}, {:?} manifests)",
        settings.server.base_url,
        settings.server.songs_path,
        settings.server.manifest
    );
}

/// Playlist to open on launch, if one is configured.
pub fn initial_playlist(settings: &config::Settings) -> Option<&str> {
    Some(settings.ui.initial_playlist.trim()).filter(|k| !k.is_empty())
}
