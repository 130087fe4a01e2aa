use std::path::Path;

use url::Url;

use crate::config::{ManifestKind, ServerSettings};
use crate::error::LoadError;

use super::listing::{listing_names, manifest_names};
use super::model::{Track, sort_tracks};
use super::source::{Fetched, ManifestSource};

/// What a successful load produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<Track>),
    /// The manifest exists but lists no audio entries.
    Empty { key: String },
    /// The manifest itself is missing.
    NotFound,
}

impl LoadOutcome {
    /// Notice the user should see for this outcome, if any.
    /// `NotFound` is intentionally silent.
    pub fn notice(&self) -> Option<String> {
        match self {
            LoadOutcome::Empty { key } => Some(format!("No tracks found in {key}.")),
            LoadOutcome::Loaded(_) | LoadOutcome::NotFound => None,
        }
    }

    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            LoadOutcome::Loaded(tracks) => tracks,
            LoadOutcome::Empty { .. } | LoadOutcome::NotFound => Vec::new(),
        }
    }
}

/// Collapse a load result into the tracks to show plus an optional notice.
/// Errors never escape: they become a notice and an empty list.
pub fn resolve(key: &str, result: Result<LoadOutcome, LoadError>) -> (Vec<Track>, Option<String>) {
    match result {
        Ok(outcome) => {
            let notice = outcome.notice();
            (outcome.into_tracks(), notice)
        }
        Err(LoadError::InvalidInput) => (Vec::new(), Some(LoadError::InvalidInput.to_string())),
        Err(e) => {
            log::warn!("loading playlist {key:?} failed: {e}");
            (
                Vec::new(),
                Some(format!("Failed to load songs from {key}: {e}")),
            )
        }
    }
}

/// Turns a playlist key into a sorted list of tracks using one manifest strategy.
pub struct PlaylistLoader<S> {
    source: S,
    /// `base_url` joined with `songs_path`, always ending in `/`.
    root: Url,
    strategy: ManifestKind,
    manifest_file: String,
    extensions: Vec<String>,
}

impl<S: ManifestSource> PlaylistLoader<S> {
    pub fn new(source: S, settings: &ServerSettings) -> Result<Self, url::ParseError> {
        let mut songs_path = settings.songs_path.clone();
        if !songs_path.ends_with('/') {
            songs_path.push('/');
        }
        let root = Url::parse(&settings.base_url)?.join(&songs_path)?;
        if root.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        let extensions = settings
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Ok(Self {
            source,
            root,
            strategy: settings.manifest,
            manifest_file: settings.manifest_file.clone(),
            extensions,
        })
    }

    /// Load and normalize the playlist stored under `key`.
    pub fn load(&self, key: &str) -> Result<LoadOutcome, LoadError> {
        if key.trim().is_empty() {
            return Err(LoadError::InvalidInput);
        }

        let folder = self.folder_url(key);
        let names = match self.strategy {
            ManifestKind::Listing => match self.source.fetch(&folder)? {
                Fetched::NotFound => return Ok(LoadOutcome::NotFound),
                Fetched::Body(html) => listing_names(&html, &folder),
            },
            ManifestKind::Json => {
                let manifest = folder
                    .join(&self.manifest_file)
                    .map_err(|e| LoadError::Manifest(e.to_string()))?;
                match self.source.fetch(&manifest)? {
                    Fetched::NotFound => return Ok(LoadOutcome::NotFound),
                    Fetched::Body(body) => manifest_names(&body)?,
                }
            }
        };

        let mut tracks: Vec<Track> = names
            .into_iter()
            .filter(|name| self.is_audio(name))
            .map(|name| Track {
                url: match self.strategy {
                    ManifestKind::Listing => self.track_url(key, &name),
                    ManifestKind::Json => self.nested_track_url(key, &name),
                },
                name,
            })
            .collect();

        log::info!("playlist {key:?}: {} track(s)", tracks.len());
        if tracks.is_empty() {
            return Ok(LoadOutcome::Empty {
                key: key.to_string(),
            });
        }

        sort_tracks(&mut tracks);
        Ok(LoadOutcome::Loaded(tracks))
    }

    /// Folder URL for `key`, with a trailing slash.
    pub fn folder_url(&self, key: &str) -> Url {
        let mut url = self.root.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(key).push("");
        }
        url
    }

    /// Playable locator for `name` inside playlist `key`; both are percent-encoded
    /// as single path segments.
    pub fn track_url(&self, key: &str, name: &str) -> Url {
        let mut url = self.root.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(key).push(name);
        }
        url
    }

    /// Locator for a manifest path such as `disc1/a.mp3`: every `/`-separated
    /// part becomes its own segment.
    pub fn nested_track_url(&self, key: &str, path: &str) -> Url {
        let mut url = self.root.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(key)
                .extend(path.split('/').filter(|part| !part.is_empty()));
        }
        url
    }

    fn is_audio(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }
}
