use std::cmp::Ordering;

use feruca::Collator;
use url::Url;

/// One playable entry of a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Decoded file name, used for display and ordering.
    pub name: String,
    pub url: Url,
}

/// Locale-aware ordering of track names using the CLDR root collation, which
/// ignores case and accents at the primary level. Full ties fall back to the
/// raw names so the result is total and stable across loads.
pub fn compare_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

pub fn sort_tracks(tracks: &mut [Track]) {
    let mut collator = Collator::default();
    tracks.sort_by(|a, b| compare_names(&mut collator, &a.name, &b.name));
}
