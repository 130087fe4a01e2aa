//! Screen regions. The same rectangles are used for drawing and for mapping
//! mouse positions back to controls.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::widgets::Block;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub notice: Rect,
    pub cards: Rect,
    pub tracks: Rect,
    pub player: Rect,
    pub footer: Rect,

    /// Inside the borders of `cards` / `tracks`: one row per entry.
    pub card_rows: Rect,
    pub track_rows: Rect,

    pub song_info: Rect,
    pub prev: Rect,
    pub toggle: Rect,
    pub next: Rect,
    pub elapsed: Rect,
    pub seek_bar: Rect,
    pub total: Rect,
    pub volume_icon: Rect,
    pub volume_slider: Rect,
}

/// What a mouse position lands on. Row offsets are relative to the first
/// visible entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Card(usize),
    Track(usize),
    Previous,
    Toggle,
    Next,
    SeekBar(f64),
    VolumeIcon,
    VolumeSlider(u8),
}

impl Regions {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[2]);

        let player_inner = Block::bordered().inner(rows[3]);
        let player_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(player_inner);

        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Min(10),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Length(12),
            ])
            .split(player_rows[1]);

        Self {
            header: rows[0],
            notice: rows[1],
            cards: body[0],
            tracks: body[1],
            player: rows[3],
            footer: rows[4],
            card_rows: Block::bordered().inner(body[0]),
            track_rows: Block::bordered().inner(body[1]),
            song_info: player_rows[0],
            prev: controls[0],
            toggle: controls[1],
            next: controls[2],
            elapsed: controls[3],
            seek_bar: controls[4],
            total: controls[5],
            volume_icon: controls[6],
            volume_slider: controls[7],
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let at = Position::new(column, row);
        if self.card_rows.contains(at) {
            Some(Hit::Card(usize::from(row - self.card_rows.y)))
        } else if self.track_rows.contains(at) {
            Some(Hit::Track(usize::from(row - self.track_rows.y)))
        } else if self.prev.contains(at) {
            Some(Hit::Previous)
        } else if self.toggle.contains(at) {
            Some(Hit::Toggle)
        } else if self.next.contains(at) {
            Some(Hit::Next)
        } else if self.seek_bar.contains(at) {
            Some(Hit::SeekBar(self.seek_fraction(column)))
        } else if self.volume_icon.contains(at) {
            Some(Hit::VolumeIcon)
        } else if self.volume_slider.contains(at) {
            Some(Hit::VolumeSlider(self.slider_percent(column)))
        } else {
            None
        }
    }

    /// Seek-bar column to a fraction in `[0, 1]`. Columns outside the bar
    /// clamp to its ends, so a drag can overshoot.
    pub fn seek_fraction(&self, column: u16) -> f64 {
        column_fraction(self.seek_bar, column)
    }

    pub fn slider_percent(&self, column: u16) -> u8 {
        (column_fraction(self.volume_slider, column) * 100.0).round() as u8
    }
}

fn column_fraction(bar: Rect, column: u16) -> f64 {
    if bar.width <= 1 {
        return 0.0;
    }
    let offset = f64::from(column.saturating_sub(bar.x));
    (offset / f64::from(bar.width - 1)).clamp(0.0, 1.0)
}
