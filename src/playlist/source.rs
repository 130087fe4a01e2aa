//! Where manifests come from.
//!
//! The loader only needs "give me the body at this URL, or tell me it is not
//! there". Production uses `HttpSource`; tests substitute an in-memory map.

use std::time::Duration;

use url::Url;

use crate::error::LoadError;

/// Result of a successful round trip to the manifest source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Body(String),
    /// The server answered 404. Unlike a transport error this raises no notice.
    NotFound,
}

pub trait ManifestSource {
    fn fetch(&self, url: &Url) -> Result<Fetched, LoadError>;
}

impl<S: ManifestSource + ?Sized> ManifestSource for &S {
    fn fetch(&self, url: &Url) -> Result<Fetched, LoadError> {
        (**self).fetch(url)
    }
}

/// Build the HTTP agent used for manifests and media downloads.
pub fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

pub struct HttpSource {
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: http_agent(timeout),
        }
    }
}

impl ManifestSource for HttpSource {
    fn fetch(&self, url: &Url) -> Result<Fetched, LoadError> {
        log::debug!("fetching manifest {url}");
        match self.agent.get(url.as_str()).call() {
            Ok(mut response) => response
                .body_mut()
                .read_to_string()
                .map(Fetched::Body)
                .map_err(|e| LoadError::Transport(e.to_string())),
            Err(ureq::Error::StatusCode(404)) => Ok(Fetched::NotFound),
            Err(ureq::Error::StatusCode(code)) => {
                Err(LoadError::Transport(format!("HTTP error! Status: {code}")))
            }
            Err(e) => Err(LoadError::Transport(e.to_string())),
        }
    }
}
