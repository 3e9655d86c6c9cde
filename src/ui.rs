//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::path::Path;
use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::config::Settings;
use crate::player::{Coordinator, EngineFactory, PlaybackState};

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render the controls help text, incorporating the configured steps.
fn controls_text(seek_step: u64, volume_step: u8) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play".to_string(),
        "[space/p] play/pause".to_string(),
        "[x] stop".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[←/→] scrub ±{seek_step}s, enter commits"),
        format!("[+/-] volume ±{volume_step}%"),
        "[v] grab volume".to_string(),
        "[/] search".to_string(),
        "[a] add".to_string(),
        "[c] clear".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn state_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Idle",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

fn entry_label(path: &Path) -> String {
    path.display().to_string()
}

/// Render the entire UI into the provided `frame` using `app` state,
/// coordinator state and settings.
pub fn draw<F: EngineFactory>(
    frame: &mut Frame,
    app: &App,
    coordinator: &Coordinator<F>,
    settings: &Settings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vivace ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Library list (or the no-media / no-matches indicators)
    let list_block = Block::default().borders(Borders::ALL).title(" library ");
    if app.no_media() {
        let empty = Paragraph::new("No media detected!")
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(empty, chunks[1]);
    } else if app.no_matches() {
        let empty = Paragraph::new("No matches found!")
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(empty, chunks[1]);
    } else {
        let display = app.display_indices();
        let items: Vec<ListItem> = display
            .iter()
            .filter_map(|&i| app.library.get(i))
            .map(|path| {
                let label = if coordinator.current_track() == Some(path) {
                    format!("▶ {}", entry_label(path))
                } else {
                    format!("  {}", entry_label(path))
                };
                ListItem::new(label)
            })
            .collect();

        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        if !display.is_empty() {
            list_state.select(Some(app.selected.min(display.len() - 1)));
        }
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    // Status line
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(state_text(coordinator.state()).to_string());
        if let Some(track) = coordinator.current_track() {
            parts.push(format!("Track: {}", entry_label(track)));
        }
        if app.drag.volume {
            parts.push(format!("Vol: {}% (grabbed)", app.volume));
        } else {
            parts.push(format!("Vol: {}%", app.volume));
        }

        match app.mode {
            InputMode::Search => parts.push(format!("Search: {}_", app.search_query)),
            InputMode::AddEntry => parts.push(format!("Add path: {}_", app.add_input)),
            InputMode::Browse => {
                if !app.search_query.is_empty() {
                    parts.push(format!("Filter: {}", app.search_query));
                }
            }
        }

        if let Some(message) = &app.status {
            parts.push(message.clone());
        }

        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[2]);

    // Position slider. While a seek drag is active the gauge shows the
    // pending scrub target, never the synced position.
    let duration = coordinator.duration_secs();
    let shown = app.scrub_secs().unwrap_or(app.slider_secs);
    let ratio = if duration > 0 {
        (shown as f64 / duration as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let label = if duration > 0 {
        format!(
            "{} / {}",
            format_mmss(Duration::from_secs(shown)),
            format_mmss(Duration::from_secs(duration))
        )
    } else {
        "--:-- / --:--".to_string()
    };
    let gauge_style = if app.drag.seek {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" position "))
        .gauge_style(gauge_style)
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, chunks[3]);

    // Controls footer
    let footer = Paragraph::new(controls_text(
        settings.player.seek_step_secs,
        settings.ui.volume_step,
    ))
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
    frame.render_widget(footer, chunks[4]);
}
