use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::error::PlaybackError;
use crate::playlist::Track;

use super::backend::{MediaBackend, MediaHandle};
use super::types::{Prepared, SessionEvent, SessionState, SessionView, Ticket};

const NO_TRACK: &str = "No song selected or available.";
const NO_PLAYLIST: &str = "Please Select Playlist.";
const RESUME_FAILED: &str = "Failed to resume playback.";

enum Media<H> {
    /// Slot reserved; the backend is still fetching.
    Loading,
    Ready(H),
}

struct Active<H> {
    index: usize,
    ticket: Ticket,
    media: Media<H>,
}

/// The playback session: owns the current playlist and at most one media
/// handle, and is the only place that creates or destroys handles.
///
/// Every method runs to completion on the caller's thread. Background work
/// (fetching, probing) re-enters through [`Session::complete`], which checks
/// the ticket before touching anything.
pub struct Session<B: MediaBackend> {
    backend: B,
    tracks: Vec<Track>,
    active: Option<Active<B::Handle>>,
    seeking: bool,
    last_ticket: u64,
    events: Sender<SessionEvent>,
}

impl<B: MediaBackend> Session<B> {
    pub fn new(backend: B, events: Sender<SessionEvent>) -> Self {
        Self {
            backend,
            tracks: Vec::new(),
            active: None,
            seeking: false,
            last_ticket: 0,
            events,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    pub fn state(&self) -> SessionState {
        match &self.active {
            None => SessionState::Idle,
            Some(Active {
                media: Media::Loading,
                ..
            }) => SessionState::Loading,
            Some(Active {
                media: Media::Ready(h),
                ..
            }) => {
                if h.is_finished() {
                    SessionState::Ended
                } else if h.is_paused() {
                    SessionState::Paused
                } else {
                    SessionState::Playing
                }
            }
        }
    }

    pub fn view(&self) -> SessionView {
        let handle = self.ready_handle();
        SessionView {
            state: self.state(),
            active_index: self.active_index(),
            track_name: self
                .active_index()
                .and_then(|i| self.tracks.get(i))
                .map(|t| t.name.clone()),
            position: handle.map(|h| h.position()).unwrap_or(Duration::ZERO),
            duration: handle.and_then(|h| h.duration()),
            volume: handle.map(|h| h.volume()),
            seeking: self.seeking,
        }
    }

    /// Swap in a new playlist. The old handle is torn down first and nothing
    /// is active afterwards.
    pub fn replace_playlist(&mut self, tracks: Vec<Track>) {
        self.release();
        self.tracks = tracks;
        self.emit(SessionEvent::Changed);
    }

    /// Tear down the current handle, if any.
    pub fn stop(&mut self) {
        if self.active.is_some() {
            self.release();
            self.emit(SessionEvent::Changed);
        }
    }

    /// Start `index` from the beginning, replacing whatever was active.
    pub fn play_track(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index).cloned() else {
            self.notice(NO_TRACK.to_string());
            return;
        };

        // Old handle goes silent before the new one exists.
        self.release();

        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.active = Some(Active {
            index,
            ticket,
            media: Media::Loading,
        });
        log::info!("loading track {index} {:?} ({ticket:?})", track.name);
        self.backend.prepare(ticket, &track);
        self.emit(SessionEvent::Changed);
    }

    /// Apply the outcome of a background load.
    pub fn complete(&mut self, prepared: Prepared<B::Media>) {
        let Prepared { ticket, result } = prepared;
        let index = match &self.active {
            Some(Active {
                index,
                ticket: current,
                media: Media::Loading,
            }) if *current == ticket => *index,
            _ => {
                log::debug!("discarding stale media for {ticket:?}");
                return;
            }
        };

        match result.and_then(|media| self.start(media)) {
            Ok(handle) => {
                if let Some(active) = self.active.as_mut() {
                    active.media = Media::Ready(handle);
                }
                log::info!("playing track {index}");
                self.emit(SessionEvent::TrackStarted { index });
                self.emit(SessionEvent::Changed);
            }
            Err(e) => self.fail(index, e),
        }
    }

    /// Toggle the track at `index`: pause/resume it if it is the active one,
    /// otherwise switch to it from the start.
    pub fn toggle_at(&mut self, index: usize) {
        let outcome = match self.active.as_mut() {
            Some(active) if active.index == index => match &mut active.media {
                Media::Loading => {
                    log::debug!("track {index} still loading; toggle ignored");
                    return;
                }
                Media::Ready(handle) => {
                    if handle.is_paused() {
                        handle.play()
                    } else {
                        handle.pause();
                        Ok(())
                    }
                }
            },
            _ => {
                self.play_track(index);
                return;
            }
        };

        if let Err(e) = outcome {
            log::warn!("resuming track {index} failed: {e}");
            self.notice(RESUME_FAILED.to_string());
        }
        self.emit(SessionEvent::Changed);
    }

    /// Transport play/pause: toggles the active track, or starts the first one.
    pub fn toggle(&mut self) {
        if self.tracks.is_empty() {
            self.notice(NO_PLAYLIST.to_string());
            return;
        }
        match self.active_index() {
            Some(index) => self.toggle_at(index),
            None => self.play_track(0),
        }
    }

    pub fn next(&mut self) {
        match next_index(self.active_index(), self.tracks.len()) {
            Some(index) => self.play_track(index),
            None => self.notice(NO_TRACK.to_string()),
        }
    }

    pub fn previous(&mut self) {
        match previous_index(self.active_index(), self.tracks.len()) {
            Some(index) => self.play_track(index),
            None => self.notice(NO_TRACK.to_string()),
        }
    }

    /// Jump to `fraction` of the track length. Does nothing without a ready
    /// handle or when the length is unknown.
    pub fn seek_to(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let Some(handle) = self.ready_handle_mut() else {
            return;
        };
        let Some(duration) = handle.duration() else {
            return;
        };

        if let Err(e) = handle.seek(duration.mul_f64(fraction)) {
            log::warn!("{e}");
        }
        self.emit(SessionEvent::Changed);
    }

    /// Move by `delta_secs` (negative rewinds), clamped to the track bounds.
    pub fn seek_by(&mut self, delta_secs: f64) {
        let Some(handle) = self.ready_handle() else {
            return;
        };
        let Some(duration) = handle.duration().filter(|d| !d.is_zero()) else {
            return;
        };
        let target = handle.position().as_secs_f64() + delta_secs;
        self.seek_to(target / duration.as_secs_f64());
    }

    /// Pointer pressed on the seek bar.
    pub fn begin_seek(&mut self, fraction: f64) {
        if self.active.is_none() {
            return;
        }
        self.seeking = true;
        self.drag_seek(fraction);
    }

    /// Pointer moved while pressed.
    pub fn drag_seek(&mut self, fraction: f64) {
        if self.seeking {
            self.seek_to(fraction);
        }
    }

    /// Pointer released.
    pub fn end_seek(&mut self) {
        self.seeking = false;
    }

    /// Apply `level` to the current handle. Without one this is a no-op and
    /// the level is not remembered for the next handle.
    pub fn set_volume(&mut self, level: f32) {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        match self.ready_handle_mut() {
            Some(handle) => {
                handle.set_volume(level);
                self.emit(SessionEvent::Changed);
            }
            None => log::debug!("no media handle; volume {level} not applied"),
        }
    }

    /// Poll the current handle; on end-of-track, advance to the next one.
    ///
    /// Only the handle currently owned is polled, so a track torn down by a
    /// playlist switch can never trigger an advance.
    pub fn tick(&mut self) {
        let ended = match &self.active {
            Some(Active {
                index,
                media: Media::Ready(h),
                ..
            }) if !h.is_paused() && h.is_finished() => *index,
            _ => return,
        };

        log::info!("track {ended} ended");
        self.emit(SessionEvent::TrackEnded { index: ended });
        self.next();
    }

    fn start(&mut self, media: B::Media) -> Result<B::Handle, PlaybackError> {
        let mut handle = self.backend.open(media)?;
        match handle.play() {
            Ok(()) => Ok(handle),
            Err(e) => {
                handle.release();
                Err(e)
            }
        }
    }

    fn fail(&mut self, index: usize, error: PlaybackError) {
        let name = self
            .tracks
            .get(index)
            .map(|t| t.name.clone())
            .unwrap_or_default();
        log::warn!("track {index} {name:?} failed: {error}");
        self.active = None;
        self.seeking = false;
        self.notice(format!("Failed to play \"{name}\": {error}"));
        self.emit(SessionEvent::Changed);
    }

    fn release(&mut self) {
        self.seeking = false;
        if let Some(active) = self.active.take() {
            if let Media::Ready(mut handle) = active.media {
                handle.release();
            }
            log::debug!("released track {} ({:?})", active.index, active.ticket);
        }
    }

    fn ready_handle(&self) -> Option<&B::Handle> {
        match &self.active {
            Some(Active {
                media: Media::Ready(h),
                ..
            }) => Some(h),
            _ => None,
        }
    }

    fn ready_handle_mut(&mut self) -> Option<&mut B::Handle> {
        match &mut self.active {
            Some(Active {
                media: Media::Ready(h),
                ..
            }) => Some(h),
            _ => None,
        }
    }

    fn notice(&self, message: String) {
        log::info!("notice: {message}");
        self.emit(SessionEvent::Notice(message));
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

/// Index after `current`, wrapping to the start. With nothing active the
/// first track is next.
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

/// Index before `current`, wrapping to the end. With nothing active the
/// last track is previous.
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i > 0 && i < len => i - 1,
        _ => len - 1,
    })
}
