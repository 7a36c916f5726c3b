//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Focus};
use crate::config::{ControlsSettings, UiSettings};
use crate::playback::{Notices, PlaybackSession, format_time, track_label};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("tab".to_string(), "folders/tracks".to_string());
    map.insert("enter".to_string(), "open folder / play track".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L and -/+ are filled dynamically from config.
    map.insert("m".to_string(), "mute".to_string());
    map.insert("r".to_string(), "reload".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the seek and volume steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = [
        "j/k", "tab", "enter", "space/p", "h/l", "H/L", "-/+", "m", "r", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!(
                "[H/L] seek -/+{}%",
                percent(controls.seek_step)
            )),
            "-/+" => Some(format!(
                "[-/+] volume -/+{}%",
                percent(f64::from(controls.volume_step))
            )),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

/// Build the status line from the playback session.
fn status_text(app: &App, session: &PlaybackSession, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    match session.current_track.as_deref() {
        Some(track) => {
            let label = track_label(track);
            parts.push(format!(
                "Song: {}{}{} [{} / {}]",
                label.clean_name,
                ui.now_playing_separator,
                label.artist,
                format_time(Some(session.position)),
                format_time(session.duration)
            ));
            if let Some(folder) = session.current_folder_name() {
                parts.push(format!("Folder: {}", folder));
            }
            parts.push(if session.is_paused { "Paused" } else { "Playing" }.to_string());
        }
        None => parts.push("Stopped".to_string()),
    }

    if session.volume > 0.0 {
        parts.push(format!("Vol: {}%", percent(f64::from(session.volume))));
    } else {
        parts.push("Vol: muted".to_string());
    }

    if !app.location.is_empty() {
        parts.push(format!("From: {}", app.location));
    }

    parts.join(" • ")
}

/// Action label shown next to a track; a paused current track can be resumed.
fn track_marker(session: &PlaybackSession, folder: &str, track: &str) -> &'static str {
    if !session.is_paused && session.is_current(folder, track) {
        "Now Playing"
    } else {
        "Play Now"
    }
}

fn list_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    session: &PlaybackSession,
    notices: &Notices,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());
    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tunedeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app, session, ui_settings))
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
    frame.render_widget(status_par, chunks[1]);

    // Folders on the left, tracks of the open folder on the right.
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);

    {
        let items: Vec<ListItem> = app
            .folders
            .iter()
            .enumerate()
            .map(|(i, folder)| {
                let marker = if app.open_folder == Some(i) { "* " } else { "  " };
                ListItem::new(format!(
                    "{}{} ({}, {})",
                    marker,
                    folder.name(),
                    folder.description(),
                    folder.song_count()
                ))
            })
            .collect();
        let list = List::new(items)
            .block(list_block(" folders ", app.focus == Focus::Folders))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !app.folders.is_empty() {
            state.select(Some(app.selected_folder));
        }
        frame.render_stateful_widget(list, columns[0], &mut state);
    }

    {
        let folder_name = app.current_folder().map(|f| f.name()).unwrap_or_default();
        let items: Vec<ListItem> = app
            .visible_tracks()
            .iter()
            .map(|track| {
                let label = track_label(&track.name);
                let current = session.is_current(folder_name, &track.name);
                let item = ListItem::new(format!(
                    "{}{}{}  [{}]",
                    label.clean_name,
                    ui_settings.now_playing_separator,
                    label.artist,
                    track_marker(session, folder_name, &track.name)
                ));
                if current { item.bold() } else { item }
            })
            .collect();
        let title = if folder_name.is_empty() {
            " tracks ".to_string()
        } else {
            format!(" tracks: {} ", folder_name)
        };
        let list = List::new(items)
            .block(list_block(&title, app.focus == Focus::Tracks))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if app.has_tracks() {
            state.select(Some(app.selected_track));
        }
        frame.render_stateful_widget(list, columns[1], &mut state);
    }

    // Toast
    let toast = notices
        .latest()
        .map(|n| n.message.as_str())
        .unwrap_or_default();
    let toast_par = Paragraph::new(toast)
        .slow_blink()
        .block(Block::default().borders(Borders::ALL).title(" notice "));
    frame.render_widget(toast_par, chunks[3]);

    let footer = Paragraph::new(controls_text(controls_settings))
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
