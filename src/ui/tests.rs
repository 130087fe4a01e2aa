use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use url::Url;

use super::reflect::*;
use super::*;
use crate::app::{App, VolumeControl, VolumeIcon};
use crate::config::{AudioSettings, UiSettings, default_playlists};
use crate::session::{SessionState, SessionView};

fn track(name: &str) -> Track {
    Track {
        name: name.to_string(),
        url: Url::parse("http://h/songs/demo/").unwrap().join(name).unwrap(),
    }
}

fn playing(index: usize, state: SessionState) -> SessionView {
    SessionView {
        state,
        active_index: Some(index),
        track_name: Some("b.mp3".into()),
        position: Duration::from_secs(75),
        duration: Some(Duration::from_secs(200)),
        volume: Some(1.0),
        seeking: false,
    }
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn clock_truncates_and_marks_unknown_totals() {
    assert_eq!(format_clock(Duration::from_millis(59_999)), "00:59");
    assert_eq!(format_clock(Duration::from_secs(605)), "10:05");
    assert_eq!(format_total(None), "--:--");
    assert_eq!(format_total(Some(Duration::from_secs(200))), "03:20");
}

#[test]
fn progress_is_clamped_and_zero_without_a_length() {
    let d = Some(Duration::from_secs(200));
    assert_eq!(progress_percent(Duration::from_secs(50), d), 25.0);
    assert_eq!(progress_percent(Duration::from_secs(250), d), 100.0);
    assert_eq!(progress_percent(Duration::from_secs(5), None), 0.0);
    assert_eq!(progress_percent(Duration::from_secs(5), Some(Duration::ZERO)), 0.0);
}

#[test]
fn only_the_active_playing_row_offers_pause() {
    let tracks = vec![track("a.mp3"), track("b.mp3"), track("c.mp3")];

    let rows = track_rows(&tracks, &playing(1, SessionState::Playing));
    let labels: Vec<&str> = rows.iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["Play", "Pause", "Play"]);
    assert!(rows[1].active);

    let rows = track_rows(&tracks, &playing(1, SessionState::Paused));
    assert!(rows.iter().all(|r| r.label == "Play"));
    assert_eq!(transport_icon(&playing(1, SessionState::Paused)), "▶");
    assert_eq!(transport_icon(&playing(1, SessionState::Playing)), "⏸");

    let idle = SessionView::default();
    assert_eq!(song_info(&idle), "");
    assert!(track_rows(&tracks, &idle).iter().all(|r| !r.active));
}

#[test]
fn placeholder_prefers_loading_over_empty() {
    assert_eq!(list_placeholder(true, 0), Some(LOADING_PLACEHOLDER));
    assert_eq!(list_placeholder(true, 3), Some(LOADING_PLACEHOLDER));
    assert_eq!(list_placeholder(false, 0), Some(EMPTY_PLACEHOLDER));
    assert_eq!(list_placeholder(false, 3), None);
}

#[test]
fn volume_icon_follows_the_level() {
    let mut v = VolumeControl::new(0.1);
    assert_eq!(volume_icon(v.icon()), volume_icon(VolumeIcon::Audible));
    v.toggle_mute();
    assert_eq!(volume_icon(v.icon()), "🔇");
}

#[test]
fn window_keeps_the_selection_visible() {
    assert_eq!(visible_window(3, 10, 2), (0, 3));
    assert_eq!(visible_window(100, 10, 0), (0, 10));
    assert_eq!(visible_window(100, 10, 50), (45, 55));
    assert_eq!(visible_window(100, 10, 99), (90, 100));
    assert_eq!(visible_window(5, 0, 3), (0, 5));
}

#[test]
fn seek_bar_columns_map_to_clamped_fractions() {
    let regions = Regions::compute(Rect::new(0, 0, 120, 40));
    let bar = regions.seek_bar;
    assert!(bar.width > 1);

    assert_eq!(regions.seek_fraction(bar.x), 0.0);
    assert_eq!(regions.seek_fraction(bar.x + bar.width - 1), 1.0);
    assert_eq!(regions.seek_fraction(0), 0.0);
    assert_eq!(regions.seek_fraction(u16::MAX), 1.0);

    let mid = regions.hit(bar.x + (bar.width - 1) / 2, bar.y);
    let Some(Hit::SeekBar(f)) = mid else {
        panic!("expected a seek-bar hit, got {mid:?}");
    };
    assert!((f - 0.5).abs() < 0.05);
}

#[test]
fn hits_resolve_to_controls_and_rows() {
    let regions = Regions::compute(Rect::new(0, 0, 120, 40));
    assert_eq!(regions.hit(regions.toggle.x, regions.toggle.y), Some(Hit::Toggle));
    assert_eq!(regions.hit(regions.prev.x, regions.prev.y), Some(Hit::Previous));
    assert_eq!(regions.hit(regions.next.x, regions.next.y), Some(Hit::Next));
    assert_eq!(
        regions.hit(regions.volume_icon.x, regions.volume_icon.y),
        Some(Hit::VolumeIcon)
    );
    assert_eq!(
        regions.hit(regions.track_rows.x, regions.track_rows.y + 2),
        Some(Hit::Track(2))
    );
    assert_eq!(
        regions.hit(regions.card_rows.x + 1, regions.card_rows.y),
        Some(Hit::Card(0))
    );
    assert_eq!(
        regions.hit(regions.volume_slider.x + regions.volume_slider.width - 1, regions.volume_slider.y),
        Some(Hit::VolumeSlider(100))
    );
    // Borders are not rows.
    assert_eq!(regions.hit(regions.tracks.x, regions.tracks.y), None);
}

#[test]
fn draw_shows_rows_placeholder_and_notice() {
    let mut app = App::new(default_playlists(), &AudioSettings::default(), &UiSettings::default());
    let tracks = vec![track("a.mp3"), track("b.mp3")];
    let view = playing(1, SessionState::Playing);
    app.notices.push("Failed to resume playback.");

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal
        .draw(|f| {
            draw(f, &app, &view, &tracks, &AudioSettings::default());
        })
        .unwrap();
    let text = screen(&terminal);
    assert!(text.contains("[Pause] b.mp3"), "{text}");
    assert!(text.contains("[Play ] a.mp3"), "{text}");
    assert!(text.contains("Failed to resume playback."));
    assert!(text.contains("01:15"));
    assert!(text.contains("03:20"));

    app.begin_load("playlist1");
    terminal
        .draw(|f| {
            draw(f, &app, &SessionView::default(), &[], &AudioSettings::default());
        })
        .unwrap();
    assert!(screen(&terminal).contains(LOADING_PLACEHOLDER));
}

#[test]
fn draw_survives_tiny_terminals() {
    let app = App::new(Vec::new(), &AudioSettings::default(), &UiSettings::default());
    for (w, h) in [(1, 1), (10, 3), (30, 8)] {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|f| {
                draw(f, &app, &SessionView::default(), &[], &AudioSettings::default());
            })
            .unwrap();
    }
}
