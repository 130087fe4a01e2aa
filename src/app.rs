//! Application module: interface state that lives next to the playback
//! session.
//!
//! `model` holds cards, cursors and playlist-load bookkeeping; `volume` and
//! `notice` back the volume controls and the notice banner.

mod model;
mod notice;
mod volume;

pub use model::*;
pub use notice::NoticeBoard;
pub use volume::{VolumeControl, VolumeIcon};

#[cfg(test)]
mod tests;
