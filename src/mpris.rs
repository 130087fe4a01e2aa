//! MPRIS D-Bus service so desktop media keys and `playerctl` drive the player.
//!
//! Method calls are forwarded as `ControlCmd`s to the event loop; properties
//! are served from a snapshot the event loop keeps up to date.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::playlist::Track;
use crate::session::SessionState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: SessionState,
    title: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
    volume: f64,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: SessionState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_volume(&self, volume: f64) {
        if let Ok(mut s) = self.state.lock() {
            s.volume = volume;
        }
    }

    /// Publish the now-playing track, or clear it with `None`.
    pub fn set_track_metadata(
        &self,
        index: Option<usize>,
        track: Option<&Track>,
        length: Option<Duration>,
    ) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        s.title = track.map(|t| t.name.clone());
        s.url = track.map(|t| t.url.to_string());
        s.length_micros = track
            .and(length)
            .map(|d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX));
        s.track_id = index
            .filter(|_| track.is_some())
            .and_then(|i| ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{i}")).ok())
            .map(OwnedObjectPath::from);
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "spindle"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["http".to_string(), "https".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec!["audio/mpeg".to_string()]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

/// MPRIS status string for a session state. A track still loading reports
/// as playing.
fn status_for(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle | SessionState::Ended => "Stopped",
        SessionState::Loading | SessionState::Playing => "Playing",
        SessionState::Paused => "Paused",
    }
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        status_for(s.playback)
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.state.lock().map(|s| s.volume).unwrap_or(0.0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(id) = s.track_id.clone().and_then(|p| owned(Value::from(p.into_inner()))) {
            map.insert("mpris:trackid".to_string(), id);
        }
        if let Some(title) = s.title.clone().and_then(|t| owned(Value::from(t))) {
            map.insert("xesam:title".to_string(), title);
        }
        if let Some(url) = s.url.clone().and_then(|u| owned(Value::from(u))) {
            map.insert("xesam:url".to_string(), url);
        }
        if let Some(length) = s.length_micros.and_then(|l| owned(Value::from(l))) {
            map.insert("mpris:length".to_string(), length);
        }
        map
    }
}

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.spindle";

/// Claim the bus name and register both interfaces. The returned connection
/// must stay alive for the service to keep answering.
async fn serve(tx: Sender<ControlCmd>, state: Arc<Mutex<SharedState>>) -> zbus::Result<Connection> {
    let connection = Connection::session().await?;
    connection.request_name(BUS_NAME).await?;

    let server = connection.object_server();
    server.at(OBJECT_PATH, RootIface { tx: tx.clone() }).await?;
    server.at(OBJECT_PATH, PlayerIface { tx, state }).await?;
    Ok(connection)
}

/// Start the MPRIS service on its own thread. Without a session bus the
/// player runs as usual and media keys do nothing.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let shared = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let _connection = match serve(tx, shared).await {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("MPRIS unavailable: {e}");
                    return;
                }
            };
            log::info!("MPRIS service registered as {BUS_NAME}");

            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
