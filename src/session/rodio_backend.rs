//! rodio-backed media handles.
//!
//! Tracks are downloaded in full on a worker thread, probed with lofty for
//! their length, and only then turned into a paused `Sink` on the session's
//! thread.

use std::io::Cursor;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::PlaybackError;
use crate::playlist::{Track, http_agent};

use super::backend::{MediaBackend, MediaHandle};
use super::types::{Prepared, Ticket};

/// Upper bound for a single download.
const MAX_MEDIA_BYTES: u64 = 512 * 1024 * 1024;

/// Downloaded bytes plus the probed length, if the container reports one.
pub struct PreparedAudio {
    bytes: Vec<u8>,
    duration: Option<Duration>,
}

pub struct RodioBackend {
    stream: OutputStream,
    agent: ureq::Agent,
    done: Sender<Prepared<PreparedAudio>>,
}

impl RodioBackend {
    pub fn new(
        timeout: Duration,
        done: Sender<Prepared<PreparedAudio>>,
    ) -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Start(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when the stream drops, which tears the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            agent: http_agent(timeout),
            done,
        })
    }
}

impl MediaBackend for RodioBackend {
    type Media = PreparedAudio;
    type Handle = RodioHandle;

    fn prepare(&mut self, ticket: Ticket, track: &Track) {
        let agent = self.agent.clone();
        let done = self.done.clone();
        let url = track.url.clone();

        thread::spawn(move || {
            let result = download(&agent, url.as_str()).map(|bytes| {
                let duration = probe_duration(&bytes);
                PreparedAudio { bytes, duration }
            });
            if let Err(e) = &result {
                log::warn!("{url}: {e}");
            }
            let _ = done.send(Prepared { ticket, result });
        });
    }

    fn open(&mut self, media: PreparedAudio) -> Result<RodioHandle, PlaybackError> {
        let PreparedAudio { bytes, duration } = media;
        let source =
            Decoder::new(Cursor::new(bytes)).map_err(|e| PlaybackError::Decode(e.to_string()))?;
        let duration = duration.or_else(|| source.total_duration());

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(source);

        Ok(RodioHandle { sink, duration })
    }
}

fn download(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>, PlaybackError> {
    log::debug!("downloading {url}");
    let mut response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::StatusCode(code) => PlaybackError::Fetch(format!("HTTP error! Status: {code}")),
        other => PlaybackError::Fetch(other.to_string()),
    })?;

    response
        .body_mut()
        .with_config()
        .limit(MAX_MEDIA_BYTES)
        .read_to_vec()
        .map_err(|e| PlaybackError::Fetch(e.to_string()))
}

/// Length from the container headers. Zero counts as unknown.
fn probe_duration(bytes: &[u8]) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    Some(tagged.properties().duration()).filter(|d| !d.is_zero())
}

pub struct RodioHandle {
    sink: Sink,
    duration: Option<Duration>,
}

impl MediaHandle for RodioHandle {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.sink.empty() {
            return Err(PlaybackError::Start("no audio queued".into()));
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn seek(&mut self, to: Duration) -> Result<(), PlaybackError> {
        self.sink
            .try_seek(to)
            .map_err(|e| PlaybackError::Seek(e.to_string()))
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn set_volume(&mut self, level: f32) {
        self.sink.set_volume(level);
    }

    fn release(&mut self) {
        self.sink.pause();
        let _ = self.sink.try_seek(Duration::ZERO);
        self.sink.stop();
    }
}
