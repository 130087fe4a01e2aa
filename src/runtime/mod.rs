use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::mpris::ControlCmd;
use crate::playlist::{HttpSource, PlaylistLoader};
use crate::session::{RodioBackend, Session};

mod event_loop;
mod input;
mod loads;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warnings) = settings::load_settings(env::args().nth(1));
    startup::start_logging(&settings, &warnings);

    let timeout = Duration::from_millis(settings.server.timeout_ms);

    let loader = PlaylistLoader::new(HttpSource::new(timeout), &settings.server)?;
    let (playlist_tx, playlist_rx) = mpsc::channel();
    let worker = loads::PlaylistWorker::new(loader, playlist_tx);

    let (media_tx, media_rx) = mpsc::channel();
    let backend = RodioBackend::new(timeout, media_tx).inspect_err(|e| log::error!("{e}"))?;
    let (event_tx, event_rx) = mpsc::channel();
    let mut session = Session::new(backend, event_tx);

    let mut app = App::new(settings.playlists.clone(), &settings.audio, &settings.ui);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    let inbox = event_loop::Inbox {
        playlists: playlist_rx,
        media: media_rx,
        events: event_rx,
        control: control_rx,
    };
    let mut player = event_loop::Player {
        settings: &settings,
        app: &mut app,
        session: &mut session,
        worker: &worker,
    };
    if let Some(key) = startup::initial_playlist(&settings) {
        player.open_playlist(key);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &mut player, &inbox, &mpris, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        log::error!("event loop failed: {e}");
    }
    log::info!("spindle exiting");
    run_result
}
