use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::error::LoadError;
use crate::playlist::{LoadOutcome, ManifestSource, PlaylistLoader};

/// A finished playlist request, tagged with the generation it was issued under.
#[derive(Debug)]
pub struct PlaylistLoaded {
    pub generation: u64,
    pub key: String,
    pub result: Result<LoadOutcome, LoadError>,
}

/// Runs playlist loads off the event-loop thread.
pub struct PlaylistWorker<S> {
    loader: Arc<PlaylistLoader<S>>,
    done: Sender<PlaylistLoaded>,
}

impl<S> PlaylistWorker<S>
where
    S: ManifestSource + Send + Sync + 'static,
{
    pub fn new(loader: PlaylistLoader<S>, done: Sender<PlaylistLoaded>) -> Self {
        Self {
            loader: Arc::new(loader),
            done,
        }
    }

    pub fn request(&self, generation: u64, key: &str) {
        let loader = self.loader.clone();
        let done = self.done.clone();
        let key = key.to_string();
        thread::spawn(move || {
            let result = loader.load(&key);
            let _ = done.send(PlaylistLoaded {
                generation,
                key,
                result,
            });
        });
    }
}
