//! UI rendering for the terminal user interface.
//!
//! `draw` renders one frame with `ratatui` from the app model and a session
//! snapshot, and returns the regions it used so input can be mapped back.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::config::AudioSettings;
use crate::playlist::Track;
use crate::session::SessionView;

mod layout;
pub mod reflect;

pub use layout::{Hit, Regions};

#[cfg(test)]
mod tests;

/// False (and logged) when `area` has no room to draw into.
fn fits(name: &str, area: Rect) -> bool {
    if area.width == 0 || area.height == 0 {
        log::debug!("skipping {name}: no room");
        return false;
    }
    true
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    view: &SessionView,
    tracks: &[Track],
    audio: &AudioSettings,
) -> Regions {
    let regions = Regions::compute(frame.area());

    if fits("header", regions.header) {
        let header = Paragraph::new(app.header_text.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" spindle ")
                    .title_alignment(Alignment::Center),
            );
        frame.render_widget(header, regions.header);
    }

    if fits("notice", regions.notice) {
        if let Some((message, others)) = app.notices.latest(Instant::now()) {
            let text = if others > 0 {
                format!(" {message} (+{others})")
            } else {
                format!(" {message}")
            };
            let banner = Paragraph::new(text).style(Style::default().fg(Color::White).bg(Color::Red));
            frame.render_widget(banner, regions.notice);
        }
    }

    if fits("playlists", regions.cards) {
        draw_cards(frame, app, &regions);
    }

    if fits("tracks", regions.tracks) {
        draw_tracks(frame, app, view, tracks, &regions);
    }

    if fits("player", regions.player) {
        draw_player(frame, app, view, &regions);
    }

    if fits("controls", regions.footer) {
        let footer = Paragraph::new(reflect::controls_text(audio.seek_step_secs))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" controls ")
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, regions.footer);
    }

    regions
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

fn draw_cards(frame: &mut Frame, app: &App, regions: &Regions) {
    let height = usize::from(regions.card_rows.height);
    let (start, end) = reflect::visible_window(app.cards.len(), height, app.selected_card);

    let items: Vec<ListItem> = app.cards[start..end]
        .iter()
        .enumerate()
        .map(|(offset, card)| {
            let i = start + offset;
            let marker = if app.current_key() == Some(card.key.as_str()) {
                "♪ "
            } else {
                "  "
            };
            let mut spans = vec![
                Span::raw(format!("{} ", i + 1)),
                Span::raw(marker),
                Span::raw(card.title.clone()).bold(),
            ];
            if !card.description.is_empty() {
                spans.push(Span::raw(format!("  {}", card.description)).dim());
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlists "))
        .highlight_style(focus_style(app.focus == Focus::Cards));
    let mut state = ListState::default();
    if app.selected_card >= start && app.selected_card < end {
        state.select(Some(app.selected_card - start));
    }
    frame.render_stateful_widget(list, regions.cards, &mut state);
}

fn draw_tracks(frame: &mut Frame, app: &App, view: &SessionView, tracks: &[Track], regions: &Regions) {
    let title = match app.current_key() {
        Some(key) => format!(" tracks: {key} "),
        None => " tracks ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(placeholder) = reflect::list_placeholder(app.is_loading(), tracks.len()) {
        let text = Paragraph::new(placeholder)
            .block(block.padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }))
            .wrap(Wrap { trim: true });
        frame.render_widget(text, regions.tracks);
        return;
    }

    // Only build items for the visible window.
    let rows = reflect::track_rows(tracks, view);
    let height = usize::from(regions.track_rows.height);
    let (start, end) = reflect::visible_window(rows.len(), height, app.selected_track);

    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .map(|row| {
            let label = Span::raw(format!("[{:<5}] ", row.label));
            let name = if row.active {
                Span::raw(row.name).fg(Color::Green).bold()
            } else {
                Span::raw(row.name)
            };
            ListItem::new(Line::from(vec![label, name]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(focus_style(app.focus == Focus::Tracks));
    let mut state = ListState::default();
    if app.selected_track >= start && app.selected_track < end {
        state.select(Some(app.selected_track - start));
    }
    frame.render_stateful_widget(list, regions.tracks, &mut state);
}

fn draw_player(frame: &mut Frame, app: &App, view: &SessionView, regions: &Regions) {
    frame.render_widget(
        Block::default().borders(Borders::ALL).title(" now playing "),
        regions.player,
    );

    let labels = [
        ("song info", regions.song_info, reflect::song_info(view).to_string()),
        ("previous", regions.prev, " ⏮ ".to_string()),
        ("toggle", regions.toggle, format!(" {} ", reflect::transport_icon(view))),
        ("next", regions.next, " ⏭ ".to_string()),
        ("elapsed", regions.elapsed, reflect::format_clock(view.position)),
        ("total", regions.total, format!(" {}", reflect::format_total(view.duration))),
        (
            "volume icon",
            regions.volume_icon,
            reflect::volume_icon(app.volume.icon()).to_string(),
        ),
    ];
    for (name, area, text) in labels {
        if fits(name, area) {
            frame.render_widget(Paragraph::new(text), area);
        }
    }

    if fits("seek bar", regions.seek_bar) {
        let percent = reflect::progress_percent(view.position, view.duration);
        let bar = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(percent / 100.0)
            .label("");
        frame.render_widget(bar, regions.seek_bar);
    }

    if fits("volume slider", regions.volume_slider) {
        let percent = app.volume.percent();
        let slider = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(f64::from(percent) / 100.0)
            .label(format!("{percent}%"));
        frame.render_widget(slider, regions.volume_slider);
    }
}
