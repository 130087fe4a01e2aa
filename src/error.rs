//! Error types shared by the playlist loader and the playback session.
//!
//! Nothing here is fatal: every variant ends up as a transient notice in the
//! UI and the player falls back to an idle state.

use thiserror::Error;

/// Failure to turn a playlist key into a list of tracks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The playlist key was empty or whitespace only. No request was made.
    #[error("No folder path specified.")]
    InvalidInput,

    /// Network error or a non-success status other than "not found".
    #[error("{0}")]
    Transport(String),

    /// The manifest was retrieved but could not be understood.
    #[error("malformed manifest: {0}")]
    Manifest(String),
}

/// Failure to load, start or drive a single track.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("could not fetch media: {0}")]
    Fetch(String),

    #[error("unsupported or corrupt media: {0}")]
    Decode(String),

    #[error("could not start playback: {0}")]
    Start(String),

    #[error("seek failed: {0}")]
    Seek(String),
}
