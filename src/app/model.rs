//! Application model: everything the interface shows that is not owned by the
//! playback session.

use std::time::Duration;

use crate::config::{AudioSettings, PlaylistCard, UiSettings};

use super::notice::NoticeBoard;
use super::volume::VolumeControl;

/// Which pane the cursor keys move in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Cards,
    Tracks,
}

/// The main application model.
pub struct App {
    pub cards: Vec<PlaylistCard>,
    pub focus: Focus,
    pub selected_card: usize,
    pub selected_track: usize,
    pub volume: VolumeControl,
    pub notices: NoticeBoard,
    pub header_text: String,

    /// Key of the playlist shown (or being fetched).
    current_key: Option<String>,
    loading: bool,
    generation: u64,
}

impl App {
    pub fn new(cards: Vec<PlaylistCard>, audio: &AudioSettings, ui: &UiSettings) -> Self {
        Self {
            cards,
            focus: Focus::default(),
            selected_card: 0,
            selected_track: 0,
            volume: VolumeControl::new(audio.unmute_level),
            notices: NoticeBoard::new(Duration::from_millis(ui.notice_ms)),
            header_text: ui.header_text.clone(),
            current_key: None,
            loading: false,
            generation: 0,
        }
    }

    /// Record a new playlist request and return its generation. Any earlier
    /// request still in flight becomes stale.
    pub fn begin_load(&mut self, key: &str) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.current_key = Some(key.to_string());
        self.selected_track = 0;
        if let Some(i) = self.cards.iter().position(|c| c.key == key) {
            self.selected_card = i;
        }
        self.generation
    }

    /// Whether the completion for `generation` should be applied. Accepting
    /// ends the loading state.
    pub fn accept_load(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.loading {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current_key.as_deref()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Cards => Focus::Tracks,
            Focus::Tracks => Focus::Cards,
        };
    }

    /// Move the cursor in the focused pane, clamped to its bounds.
    pub fn move_cursor(&mut self, delta: isize, track_count: usize) {
        match self.focus {
            Focus::Cards => {
                self.selected_card = step_clamped(self.selected_card, delta, self.cards.len());
            }
            Focus::Tracks => {
                self.selected_track = step_clamped(self.selected_track, delta, track_count);
            }
        }
    }

    /// Put the track cursor on the track that just started.
    pub fn follow(&mut self, index: usize) {
        self.selected_track = index;
    }
}

fn step_clamped(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}
