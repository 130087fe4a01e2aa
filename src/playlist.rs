//! Playlist loading: manifest retrieval, parsing and normalization into
//! sorted `Track` lists.

mod listing;
mod loader;
mod model;
mod source;

pub use loader::{LoadOutcome, PlaylistLoader, resolve};
pub use model::{Track, compare_names};
pub use source::{Fetched, HttpSource, ManifestSource, http_agent};
