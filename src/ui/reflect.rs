//! Pure projections of playlist + session state into what the screen shows.
//! Re-derived every frame; nothing here keeps state.

use std::time::Duration;

use crate::app::VolumeIcon;
use crate::playlist::Track;
use crate::session::SessionView;

pub const LOADING_PLACEHOLDER: &str = "Loading songs...";
pub const EMPTY_PLACEHOLDER: &str = "No songs available. Please Select Playlist";

/// `MM:SS`, seconds truncated.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Total time, or `--:--` when the length is unknown.
pub fn format_total(d: Option<Duration>) -> String {
    d.map(format_clock).unwrap_or_else(|| "--:--".to_string())
}

/// Progress in percent, always within 0..=100. Zero when the length is
/// unknown or zero.
pub fn progress_percent(position: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(d) if !d.is_zero() => {
            (position.as_secs_f64() / d.as_secs_f64() * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Label of a row's toggle button.
pub fn toggle_label(view: &SessionView, index: usize) -> &'static str {
    if view.is_playing_index(index) {
        "Pause"
    } else {
        "Play"
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TrackRow<'a> {
    pub name: &'a str,
    pub label: &'static str,
    pub active: bool,
}

pub fn track_rows<'a>(tracks: &'a [Track], view: &SessionView) -> Vec<TrackRow<'a>> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackRow {
            name: t.name.as_str(),
            label: toggle_label(view, i),
            active: view.active_index == Some(i),
        })
        .collect()
}

/// Transport play/pause icon: shows the action a press would take.
pub fn transport_icon(view: &SessionView) -> &'static str {
    if view.state.is_playing() { "⏸" } else { "▶" }
}

pub fn song_info(view: &SessionView) -> &str {
    view.track_name.as_deref().unwrap_or("")
}

/// Text shown in place of the track list, if any.
pub fn list_placeholder(loading: bool, track_count: usize) -> Option<&'static str> {
    if loading {
        Some(LOADING_PLACEHOLDER)
    } else if track_count == 0 {
        Some(EMPTY_PLACEHOLDER)
    } else {
        None
    }
}

pub fn volume_icon(icon: VolumeIcon) -> &'static str {
    match icon {
        VolumeIcon::Muted => "🔇",
        VolumeIcon::Audible => "🔊",
    }
}

/// Window `[start, end)` of a `total`-row list shown in `height` rows, keeping
/// `selected` centered when possible.
pub fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let selected = selected.min(total - 1);
    let half = height / 2;
    let start = selected.saturating_sub(half).min(total - height);
    (start, start + height)
}

/// Footer help line.
pub fn controls_text(seek_step_secs: u64) -> String {
    [
        "[tab] focus".to_string(),
        "[j/k] up/down".to_string(),
        "[enter] open/toggle".to_string(),
        "[1-9] playlist".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[←/→] seek -/+{seek_step_secs}s"),
        "[-/+] volume".to_string(),
        "[m] mute".to_string(),
        "[s] stop".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}
