//! Session-related small types: states, request tickets, notifications and
//! the read-only snapshot handed to the UI.

use std::time::Duration;

use crate::error::PlaybackError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No media handle.
    #[default]
    Idle,
    /// A handle slot is reserved and the media is being fetched and probed.
    Loading,
    Playing,
    Paused,
    /// The current track ran out; the next `tick` advances.
    Ended,
}

impl SessionState {
    pub fn is_playing(self) -> bool {
        self == SessionState::Playing
    }
}

/// Identity of one play request. Completions carrying any other ticket than
/// the session's current one are stale and get dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ticket(pub(crate) u64);

/// Result of a background media load, addressed by ticket.
#[derive(Debug)]
pub struct Prepared<M> {
    pub ticket: Ticket,
    pub result: Result<M, PlaybackError>,
}

/// Notifications emitted by the session. Subscribers re-derive their view
/// from `Session::view` rather than patching state from these.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Something observable changed.
    Changed,
    /// A new handle started playing `index`.
    TrackStarted { index: usize },
    /// `index` reached its end and auto-advance is about to run.
    TrackEnded { index: usize },
    /// User-facing message for the notice banner.
    Notice(String),
}

/// Snapshot of the session for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionView {
    pub state: SessionState,
    pub active_index: Option<usize>,
    pub track_name: Option<String>,
    pub position: Duration,
    /// `None` while loading or when the media does not report a length.
    pub duration: Option<Duration>,
    pub volume: Option<f32>,
    pub seeking: bool,
}

impl SessionView {
    /// True when `index` is the active track and audibly playing.
    pub fn is_playing_index(&self, index: usize) -> bool {
        self.active_index == Some(index) && self.state.is_playing()
    }
}
