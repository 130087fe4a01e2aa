use std::time::{Duration, Instant};

use super::*;
use crate::config::{AudioSettings, UiSettings, default_playlists};

fn app() -> App {
    App::new(
        default_playlists(),
        &AudioSettings::default(),
        &UiSettings::default(),
    )
}

#[test]
fn only_the_latest_playlist_request_is_accepted() {
    let mut app = app();
    let first = app.begin_load("playlist1");
    let second = app.begin_load("playlist2");
    assert!(app.is_loading());
    assert_eq!(app.current_key(), Some("playlist2"));
    assert_eq!(app.selected_card, 2);

    assert!(!app.accept_load(first));
    assert!(app.is_loading());
    assert!(app.accept_load(second));
    assert!(!app.is_loading());
    assert!(!app.accept_load(second));
}

#[test]
fn cursor_moves_in_the_focused_pane_and_clamps() {
    let mut app = app();
    app.move_cursor(-1, 5);
    assert_eq!(app.selected_card, 0);
    app.move_cursor(10, 5);
    assert_eq!(app.selected_card, app.cards.len() - 1);

    app.toggle_focus();
    assert_eq!(app.focus, Focus::Tracks);
    app.move_cursor(3, 5);
    assert_eq!(app.selected_track, 3);
    app.move_cursor(3, 5);
    assert_eq!(app.selected_track, 4);
    app.move_cursor(1, 0);
    assert_eq!(app.selected_track, 0);
}

#[test]
fn volume_slider_and_icon_share_one_level() {
    let mut v = VolumeControl::new(0.1);
    assert_eq!(v.percent(), 100);
    assert_eq!(v.icon(), VolumeIcon::Audible);

    v.set_percent(0);
    assert!(v.is_muted());
    assert_eq!(v.icon(), VolumeIcon::Muted);

    v.toggle_mute();
    assert_eq!(v.level(), 0.1);
    assert_eq!(v.percent(), 10);
    assert_eq!(v.icon(), VolumeIcon::Audible);

    v.set_percent(60);
    v.toggle_mute();
    assert_eq!(v.level(), 0.0);
    assert_eq!(v.percent(), 0);
}

#[test]
fn volume_steps_stay_in_range_without_drift() {
    let mut v = VolumeControl::new(0.1);
    v.step(0.05);
    assert_eq!(v.level(), 1.0);
    for _ in 0..3 {
        v.step(-0.05);
    }
    assert_eq!(v.percent(), 85);
    v.set_level(f32::NAN);
    assert!(v.is_muted());
    v.set_level(-3.0);
    assert_eq!(v.level(), 0.0);
}

#[test]
fn notices_expire_individually() {
    let start = Instant::now();
    let mut board = NoticeBoard::new(Duration::from_millis(3000));
    board.push_at("first", start);
    board.push_at("second", start + Duration::from_millis(1000));

    assert_eq!(
        board.latest(start + Duration::from_millis(1500)),
        Some(("second", 1))
    );
    assert_eq!(
        board.latest(start + Duration::from_millis(3500)),
        Some(("second", 0))
    );
    board.prune(start + Duration::from_millis(4000));
    assert_eq!(board.latest(start + Duration::from_millis(4000)), None);
}
