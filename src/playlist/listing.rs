//! Manifest parsers: HTML directory listings and JSON track lists.
//!
//! Both return raw, decoded file names in document order. Filtering by
//! extension and sorting happen in the loader.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::error::LoadError;

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("href pattern is valid")
});

/// Decode `%XX` escapes. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_name(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// File names linked from an HTML directory listing served at `folder`.
///
/// Each `href` has its HTML entities decoded and is resolved against the
/// folder URL; links to directories (trailing slash) are skipped, and
/// repeated links are reported once.
pub fn listing_names(html: &str, folder: &Url) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for caps in HREF.captures_iter(html) {
        let Some(href) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) else {
            continue;
        };
        let href = decode_html_entities(href.as_str());
        let Ok(resolved) = folder.join(&href) else {
            log::debug!("skipping unresolvable href {href:?}");
            continue;
        };
        if resolved.path().ends_with('/') {
            continue;
        }
        let Some(last) = resolved.path_segments().and_then(|mut s| s.next_back()) else {
            continue;
        };
        let name = decode_name(last);
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestDoc {
    Wrapped { tracks: Vec<ManifestEntry> },
    Bare(Vec<ManifestEntry>),
}

#[derive(Deserialize)]
struct ManifestEntry {
    name: String,
}

/// File names listed by a JSON manifest.
pub fn manifest_names(body: &str) -> Result<Vec<String>, LoadError> {
    let doc: ManifestDoc =
        serde_json::from_str(body).map_err(|e| LoadError::Manifest(e.to_string()))?;
    let entries = match doc {
        ManifestDoc::Wrapped { tracks } => tracks,
        ManifestDoc::Bare(entries) => entries,
    };
    Ok(entries
        .into_iter()
        .map(|e| decode_name(e.name.trim()))
        .filter(|n| !n.is_empty())
        .collect())
}
