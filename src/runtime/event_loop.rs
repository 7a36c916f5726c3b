use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::runtime::Runtime;

use crate::app::{App, Focus};
use crate::audio::PlaybackSink;
use crate::catalog::load_catalog;
use crate::config;
use crate::playback::{PlayError, Player};
use crate::source::MediaSource;
use crate::ui;

/// Everything the loop needs besides the mutable models.
pub struct EventLoopContext<'a, S> {
    pub settings: &'a config::Settings,
    /// Drives source probes; the loop blocks on each one.
    pub rt: &'a Runtime,
    pub library: &'a S,
}

/// Main terminal event loop: handles input, UI drawing and the sink's
/// notifications. Returns `Ok(())` when shutdown is requested.
pub fn run<S, K>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ctx: &EventLoopContext<'_, S>,
    app: &mut App,
    player: &mut Player<K>,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: MediaSource,
    K: PlaybackSink,
{
    let toast_ttl = Duration::from_millis(ctx.settings.ui.toast_ms);

    loop {
        let now = Instant::now();
        player.pump_events(now);
        if player.take_due_advance(now) {
            let result = ctx.rt.block_on(player.next(ctx.library, app.current_folder()));
            after_play(result, app, player);
        }
        player.notices_mut().prune(now, toast_ttl);

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                player.session(),
                player.notices(),
                &ctx.settings.ui,
                &ctx.settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, ctx, app, player) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Keep the track cursor on the playing track when its folder is open.
fn after_play<K: PlaybackSink>(result: Result<(), PlayError>, app: &mut App, player: &Player<K>) {
    if let Err(e) = result {
        debug!("Play request failed: {e}");
        return;
    }
    let session = player.session();
    let open = app.current_folder().map(|f| f.name());
    if open.is_some() && open == session.current_folder_name() {
        if let Some(track) = session.current_track.clone() {
            app.select_track_named(&track);
        }
    }
}

fn handle_key_event<S, K>(
    key: KeyEvent,
    ctx: &EventLoopContext<'_, S>,
    app: &mut App,
    player: &mut Player<K>,
) -> bool
where
    S: MediaSource,
    K: PlaybackSink,
{
    let controls = &ctx.settings.controls;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => match app.focus {
            Focus::Folders => app.open_selected_folder(),
            Focus::Tracks => {
                let Some(folder) = app.current_folder() else {
                    return false;
                };
                let Some(track) = folder.audio_files().get(app.selected_track) else {
                    return false;
                };
                let session = player.session();
                let is_playing_selected =
                    !session.is_paused && session.is_current(folder.name(), &track.name);
                if !is_playing_selected {
                    let result = ctx
                        .rt
                        .block_on(player.play(ctx.library, folder, app.selected_track));
                    after_play(result, app, player);
                }
            }
        },
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let result = ctx
                .rt
                .block_on(player.toggle_pause(ctx.library, app.current_folder()));
            after_play(result, app, player);
        }
        KeyCode::Char('l') => {
            let result = ctx.rt.block_on(player.next(ctx.library, app.current_folder()));
            after_play(result, app, player);
        }
        KeyCode::Char('h') => {
            let result = ctx
                .rt
                .block_on(player.previous(ctx.library, app.current_folder()));
            after_play(result, app, player);
        }
        KeyCode::Char('L') => player.seek_by(controls.seek_step),
        KeyCode::Char('H') => player.seek_by(-controls.seek_step),
        KeyCode::Char('+') | KeyCode::Char('=') => player.change_volume(controls.volume_step),
        KeyCode::Char('-') => player.change_volume(-controls.volume_step),
        KeyCode::Char('m') => player.toggle_mute(),
        KeyCode::Char('r') => {
            let folders = ctx.rt.block_on(load_catalog(ctx.library, &ctx.settings.catalog));
            app.replace_folders(folders);
            player.notices_mut().push("Catalog reloaded");
        }
        _ => {}
    }

    false
}
