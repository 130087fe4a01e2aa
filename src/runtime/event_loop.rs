use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Focus};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playlist::{ManifestSource, resolve};
use crate::runtime::input::{self, Action, InputContext};
use crate::runtime::loads::{PlaylistLoaded, PlaylistWorker};
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::session::{MediaBackend, Prepared, Session, SessionEvent, SessionState};
use crate::ui::{self, Regions, reflect};

/// Receiving ends of every channel the loop drains.
pub struct Inbox<M> {
    pub playlists: Receiver<PlaylistLoaded>,
    pub media: Receiver<Prepared<M>>,
    pub events: Receiver<SessionEvent>,
    pub control: Receiver<ControlCmd>,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Regions of the last drawn frame, for mouse hit-testing.
    pub regions: Regions,
    /// Last state pushed to MPRIS.
    pub last_mpris: Option<MprisSnapshot>,
}

/// Everything an action may touch.
pub struct Player<'a, B: MediaBackend, S> {
    pub settings: &'a config::Settings,
    pub app: &'a mut App,
    pub session: &'a mut Session<B>,
    pub worker: &'a PlaylistWorker<S>,
}

/// Main terminal event loop: drains completions, session events and media-key
/// commands, redraws, then waits briefly for terminal input. Returns `Ok(())`
/// when shutdown is requested.
pub fn run<B, S>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    player: &mut Player<'_, B, S>,
    inbox: &Inbox<B::Media>,
    mpris: &MprisHandle,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>>
where
    B: MediaBackend,
    S: ManifestSource + Send + Sync + 'static,
{
    loop {
        for loaded in inbox.playlists.try_iter() {
            player.playlist_loaded(loaded);
        }
        for prepared in inbox.media.try_iter() {
            player.session.complete(prepared);
        }

        player.session.tick();

        for event in inbox.events.try_iter() {
            player.session_event(event);
        }

        for cmd in inbox.control.try_iter() {
            log::debug!("media key: {cmd:?}");
            if player.apply(input::control_action(cmd)) {
                return Ok(());
            }
        }

        let view = player.session.view();
        update_mpris(mpris, &view, player.session.tracks(), &mut state.last_mpris);

        player.app.notices.prune(Instant::now());
        {
            let app = &*player.app;
            let tracks = player.session.tracks();
            let audio = &player.settings.audio;
            terminal.draw(|f| state.regions = ui::draw(f, app, &view, tracks, audio))?;
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ctx = player.input_context(&state.regions);
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => input::key_action(key, &ctx),
            Event::Mouse(mouse) => input::mouse_action(mouse, &state.regions, &ctx),
            _ => None,
        };
        if let Some(action) = action {
            if player.apply(action) {
                return Ok(());
            }
        }
    }
}

impl<B, S> Player<'_, B, S>
where
    B: MediaBackend,
    S: ManifestSource + Send + Sync + 'static,
{
    /// Tear down playback and request `key`. The list shows the loading
    /// placeholder until the matching completion arrives.
    pub fn open_playlist(&mut self, key: &str) {
        let generation = self.app.begin_load(key);
        log::info!("opening playlist {key:?} (generation {generation})");
        self.session.replace_playlist(Vec::new());
        self.worker.request(generation, key);
    }

    fn playlist_loaded(&mut self, loaded: PlaylistLoaded) {
        let PlaylistLoaded {
            generation,
            key,
            result,
        } = loaded;
        if !self.app.accept_load(generation) {
            log::debug!("discarding stale playlist {key:?} (generation {generation})");
            return;
        }

        let (tracks, notice) = resolve(&key, result);
        self.session.replace_playlist(tracks);
        if let Some(notice) = notice {
            self.app.notices.push(notice);
        }
    }

    fn session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Changed => {}
            SessionEvent::TrackStarted { index } => {
                // New handles start at full volume; match what the controls show.
                self.session.set_volume(self.app.volume.level());
                self.app.follow(index);
            }
            SessionEvent::TrackEnded { index } => log::debug!("auto-advancing from {index}"),
            SessionEvent::Notice(message) => self.app.notices.push(message),
        }
    }

    fn input_context(&self, regions: &Regions) -> InputContext {
        let track_count = self.session.tracks().len();
        let card_count = self.app.cards.len();
        InputContext {
            seek_step_secs: self.settings.audio.seek_step_secs as f64,
            volume_step: self.settings.audio.volume_step,
            card_count,
            card_window_start: reflect::visible_window(
                card_count,
                usize::from(regions.card_rows.height),
                self.app.selected_card,
            )
            .0,
            track_count,
            track_window_start: reflect::visible_window(
                track_count,
                usize::from(regions.track_rows.height),
                self.app.selected_track,
            )
            .0,
            seeking: self.session.is_seeking(),
        }
    }

    fn apply_volume(&mut self) {
        self.session.set_volume(self.app.volume.level());
    }

    /// Apply one action. Returns `true` when the player should quit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                self.session.stop();
                return true;
            }
            Action::SelectCard(index) => match self.app.cards.get(index) {
                Some(card) => {
                    let key = card.key.clone();
                    self.open_playlist(&key);
                }
                None => log::debug!("no playlist card {index}"),
            },
            Action::ToggleTrack(index) => {
                self.app.selected_track = index;
                self.session.toggle_at(index);
            }
            Action::TogglePlayback => self.session.toggle(),
            Action::Play => {
                let state = self.session.state();
                if !state.is_playing() && state != SessionState::Loading {
                    self.session.toggle();
                }
            }
            Action::Pause => {
                if self.session.state().is_playing() {
                    self.session.toggle();
                }
            }
            Action::Stop => self.session.stop(),
            Action::Next => self.session.next(),
            Action::Previous => self.session.previous(),
            Action::SeekBegin(fraction) => self.session.begin_seek(fraction),
            Action::SeekDrag(fraction) => self.session.drag_seek(fraction),
            Action::SeekEnd => self.session.end_seek(),
            Action::SeekBy(secs) => self.session.seek_by(secs),
            Action::SetVolumePercent(percent) => {
                self.app.volume.set_percent(percent);
                self.apply_volume();
            }
            Action::VolumeStep(delta) => {
                self.app.volume.step(delta);
                self.apply_volume();
            }
            Action::ToggleMute => {
                self.app.volume.toggle_mute();
                self.apply_volume();
            }
            Action::CursorUp => {
                let count = self.session.tracks().len();
                self.app.move_cursor(-1, count);
            }
            Action::CursorDown => {
                let count = self.session.tracks().len();
                self.app.move_cursor(1, count);
            }
            Action::SwitchFocus => self.app.toggle_focus(),
            Action::Activate => {
                let next = match self.app.focus {
                    Focus::Cards => Action::SelectCard(self.app.selected_card),
                    Focus::Tracks => Action::ToggleTrack(self.app.selected_track),
                };
                return self.apply(next);
            }
        }
        false
    }
}
