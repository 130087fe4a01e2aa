//! Terminal and media-key input mapped onto player actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::mpris::ControlCmd;
use crate::ui::{Hit, Regions};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectCard(usize),
    ToggleTrack(usize),
    TogglePlayback,
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    SeekBegin(f64),
    SeekDrag(f64),
    SeekEnd,
    SeekBy(f64),
    SetVolumePercent(u8),
    VolumeStep(f32),
    ToggleMute,
    CursorUp,
    CursorDown,
    SwitchFocus,
    Activate,
}

/// What the mapping needs to know about the current screen.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub seek_step_secs: f64,
    pub volume_step: f32,
    pub card_count: usize,
    pub card_window_start: usize,
    pub track_count: usize,
    pub track_window_start: usize,
    /// A seek-bar drag is in progress.
    pub seeking: bool,
}

pub fn key_action(key: KeyEvent, ctx: &InputContext) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::TogglePlayback,
        KeyCode::Char('l') | KeyCode::Char('n') => Action::Next,
        KeyCode::Char('h') | KeyCode::Char('b') => Action::Previous,
        KeyCode::Right => Action::SeekBy(ctx.seek_step_secs),
        KeyCode::Left => Action::SeekBy(-ctx.seek_step_secs),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::VolumeStep(ctx.volume_step),
        KeyCode::Char('-') => Action::VolumeStep(-ctx.volume_step),
        KeyCode::Char('m') => Action::ToggleMute,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Tab => Action::SwitchFocus,
        KeyCode::Enter => Action::Activate,
        KeyCode::Char(c @ '1'..='9') => Action::SelectCard(c as usize - '1' as usize),
        _ => return None,
    };
    Some(action)
}

pub fn mouse_action(event: MouseEvent, regions: &Regions, ctx: &InputContext) -> Option<Action> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match regions.hit(event.column, event.row)? {
                Hit::Card(offset) => {
                    let index = ctx.card_window_start + offset;
                    (index < ctx.card_count).then_some(Action::SelectCard(index))
                }
                Hit::Track(offset) => {
                    let index = ctx.track_window_start + offset;
                    (index < ctx.track_count).then_some(Action::ToggleTrack(index))
                }
                Hit::Previous => Some(Action::Previous),
                Hit::Toggle => Some(Action::TogglePlayback),
                Hit::Next => Some(Action::Next),
                Hit::SeekBar(fraction) => Some(Action::SeekBegin(fraction)),
                Hit::VolumeIcon => Some(Action::ToggleMute),
                Hit::VolumeSlider(percent) => Some(Action::SetVolumePercent(percent)),
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if ctx.seeking {
                return Some(Action::SeekDrag(regions.seek_fraction(event.column)));
            }
            match regions.hit(event.column, event.row)? {
                Hit::VolumeSlider(percent) => Some(Action::SetVolumePercent(percent)),
                _ => None,
            }
        }
        MouseEventKind::Up(MouseButton::Left) if ctx.seeking => Some(Action::SeekEnd),
        MouseEventKind::ScrollDown => Some(Action::CursorDown),
        MouseEventKind::ScrollUp => Some(Action::CursorUp),
        _ => None,
    }
}

pub fn control_action(cmd: ControlCmd) -> Action {
    match cmd {
        ControlCmd::Quit => Action::Quit,
        ControlCmd::Play => Action::Play,
        ControlCmd::Pause => Action::Pause,
        ControlCmd::PlayPause => Action::TogglePlayback,
        ControlCmd::Stop => Action::Stop,
        ControlCmd::Next => Action::Next,
        ControlCmd::Prev => Action::Previous,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;
    use ratatui::layout::Rect;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctx() -> InputContext {
        InputContext {
            seek_step_secs: 5.0,
            volume_step: 0.05,
            card_count: 4,
            card_window_start: 0,
            track_count: 30,
            track_window_start: 10,
            seeking: false,
        }
    }

    #[test]
    fn keys_map_to_transport_and_navigation() {
        let c = ctx();
        assert_eq!(key_action(key(KeyCode::Char(' ')), &c), Some(Action::TogglePlayback));
        assert_eq!(key_action(key(KeyCode::Char('l')), &c), Some(Action::Next));
        assert_eq!(key_action(key(KeyCode::Char('h')), &c), Some(Action::Previous));
        assert_eq!(key_action(key(KeyCode::Left), &c), Some(Action::SeekBy(-5.0)));
        assert_eq!(key_action(key(KeyCode::Char('-')), &c), Some(Action::VolumeStep(-0.05)));
        assert_eq!(key_action(key(KeyCode::Char('3')), &c), Some(Action::SelectCard(2)));
        assert_eq!(key_action(key(KeyCode::Char('0')), &c), None);
        assert_eq!(key_action(key(KeyCode::Char('x')), &c), None);

        let ctrl_c = KeyEvent {
            kind: KeyEventKind::Press,
            ..KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        };
        assert_eq!(key_action(ctrl_c, &c), Some(Action::Quit));
    }

    #[test]
    fn clicks_on_rows_account_for_the_scroll_window() {
        let regions = Regions::compute(Rect::new(0, 0, 120, 40));
        let c = ctx();

        let click = mouse(
            MouseEventKind::Down(MouseButton::Left),
            regions.track_rows.x + 3,
            regions.track_rows.y + 2,
        );
        assert_eq!(mouse_action(click, &regions, &c), Some(Action::ToggleTrack(12)));

        let beyond = InputContext {
            track_count: 11,
            ..ctx()
        };
        assert_eq!(mouse_action(click, &regions, &beyond), None);

        let card = mouse(
            MouseEventKind::Down(MouseButton::Left),
            regions.card_rows.x,
            regions.card_rows.y + 3,
        );
        assert_eq!(mouse_action(card, &regions, &c), Some(Action::SelectCard(3)));
        let past_cards = mouse(
            MouseEventKind::Down(MouseButton::Left),
            regions.card_rows.x,
            regions.card_rows.y + 4,
        );
        assert_eq!(mouse_action(past_cards, &regions, &c), None);
    }

    #[test]
    fn seek_bar_press_drag_release() {
        let regions = Regions::compute(Rect::new(0, 0, 120, 40));
        let bar = regions.seek_bar;

        let press = mouse(MouseEventKind::Down(MouseButton::Left), bar.x, bar.y);
        assert_eq!(mouse_action(press, &regions, &ctx()), Some(Action::SeekBegin(0.0)));

        let dragging = InputContext {
            seeking: true,
            ..ctx()
        };
        // Dragging past the bar, even off its row, clamps to the end.
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 119, 0);
        assert_eq!(mouse_action(drag, &regions, &dragging), Some(Action::SeekDrag(1.0)));
        assert_eq!(mouse_action(drag, &regions, &ctx()), None);

        let release = mouse(MouseEventKind::Up(MouseButton::Left), 0, 0);
        assert_eq!(mouse_action(release, &regions, &dragging), Some(Action::SeekEnd));
        assert_eq!(mouse_action(release, &regions, &ctx()), None);
    }

    #[test]
    fn volume_controls_respond_to_clicks() {
        let regions = Regions::compute(Rect::new(0, 0, 120, 40));
        let icon = mouse(
            MouseEventKind::Down(MouseButton::Left),
            regions.volume_icon.x,
            regions.volume_icon.y,
        );
        assert_eq!(mouse_action(icon, &regions, &ctx()), Some(Action::ToggleMute));

        let slider = regions.volume_slider;
        let start = mouse(MouseEventKind::Down(MouseButton::Left), slider.x, slider.y);
        assert_eq!(
            mouse_action(start, &regions, &ctx()),
            Some(Action::SetVolumePercent(0))
        );
    }

    #[test]
    fn media_keys_reuse_the_same_actions() {
        assert_eq!(control_action(ControlCmd::PlayPause), Action::TogglePlayback);
        assert_eq!(control_action(ControlCmd::Prev), Action::Previous);
        assert_eq!(control_action(ControlCmd::Quit), Action::Quit);
    }
}
