//! The seam between the session state machine and whatever actually makes
//! sound.

use std::time::Duration;

use crate::error::PlaybackError;
use crate::playlist::Track;

use super::types::Ticket;

/// A single playable media resource. Owned exclusively by the session.
pub trait MediaHandle {
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    /// True once the media has played to its end.
    fn is_finished(&self) -> bool;
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    fn seek(&mut self, to: Duration) -> Result<(), PlaybackError>;
    fn volume(&self) -> f32;
    fn set_volume(&mut self, level: f32);
    /// Pause, rewind to zero and stop producing audio. Called exactly once,
    /// right before the handle is dropped.
    fn release(&mut self);
}

pub trait MediaBackend {
    /// Fetched and probed media, ready to be turned into a handle.
    type Media;
    type Handle: MediaHandle;

    /// Start loading `track` without blocking. The result must be delivered
    /// later as a `Prepared` carrying `ticket`.
    fn prepare(&mut self, ticket: Ticket, track: &Track);

    /// Create a paused handle from prepared media.
    fn open(&mut self, media: Self::Media) -> Result<Self::Handle, PlaybackError>;
}
