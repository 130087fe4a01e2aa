use std::time::Duration;

use crate::mpris::MprisHandle;
use crate::playlist::Track;
use crate::session::{SessionState, SessionView};

/// The part of the session MPRIS clients see. Only pushed when it changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MprisSnapshot {
    state: SessionState,
    index: Option<usize>,
    duration: Option<Duration>,
    volume: Option<f32>,
}

pub fn update_mpris(
    mpris: &MprisHandle,
    view: &SessionView,
    tracks: &[Track],
    last: &mut Option<MprisSnapshot>,
) {
    let snapshot = MprisSnapshot {
        state: view.state,
        index: view.active_index,
        duration: view.duration,
        volume: view.volume,
    };
    if last.as_ref() == Some(&snapshot) {
        return;
    }

    let track = view.active_index.and_then(|i| tracks.get(i));
    mpris.set_track_metadata(view.active_index, track, view.duration);
    mpris.set_playback(view.state);
    mpris.set_volume(view.volume.map(f64::from).unwrap_or(0.0));
    *last = Some(snapshot);
}
