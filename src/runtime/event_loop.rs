use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::config;
use crate::library::collect_media_files;
use crate::player::{Coordinator, EngineFactory, MediaQueue, PlaybackState, PositionSync};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Snapshot of the displayed list taken when a track was selected.
    pub queue: MediaQueue,
}

/// Main terminal event loop: drives the position sync, draws the UI and
/// routes key presses to the coordinator, library and view model. Returns
/// `Ok(())` when shutdown is requested.
pub fn run<F: EngineFactory>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    coordinator: &mut Coordinator<F>,
    sync: &mut PositionSync,
) -> Result<()> {
    let mut state = EventLoopState {
        queue: MediaQueue::default(),
    };

    loop {
        // Publish the engine position to the slider, unless a drag owns it.
        if let Some(secs) = sync.poll(Instant::now(), coordinator, app.drag) {
            app.slider_secs = secs;
        }

        terminal.draw(|f| ui::draw(f, app, coordinator, settings))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.mode {
            InputMode::Search => handle_search_key(key.code, app, coordinator, sync, &mut state),
            InputMode::AddEntry => handle_add_key(key.code, app, settings),
            InputMode::Browse => {
                if handle_browse_key(key.code, app, coordinator, sync, &mut state, settings) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Handle one key press in browse mode. Returns true on quit.
fn handle_browse_key<F: EngineFactory>(
    code: KeyCode,
    app: &mut App,
    coordinator: &mut Coordinator<F>,
    sync: &mut PositionSync,
    state: &mut EventLoopState,
    settings: &config::Settings,
) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char('a') => app.enter_add(),
        KeyCode::Char('c') => {
            app.library.clear();
            app.ensure_selection_visible();
            app.set_status("library cleared");
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.drag.volume {
                adjust_volume(app, coordinator, -i16::from(settings.ui.volume_step));
            } else {
                app.select_next();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.drag.volume {
                adjust_volume(app, coordinator, i16::from(settings.ui.volume_step));
            } else {
                app.select_prev();
            }
        }
        KeyCode::Enter => {
            if app.drag.seek {
                // Drag release: apply the pending value as one explicit seek.
                if let Some(secs) = app.end_seek_drag() {
                    coordinator.seek(secs);
                    app.slider_secs = secs;
                }
            } else {
                play_selected(app, coordinator, sync, state);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => toggle_pause(app, coordinator, sync, state),
        KeyCode::Char('x') => {
            coordinator.stop();
            sync.stop();
            app.cancel_seek_drag();
            app.slider_secs = 0;
        }
        KeyCode::Char('l') => skip(app, coordinator, sync, state, true),
        KeyCode::Char('h') => skip(app, coordinator, sync, state, false),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            adjust_volume(app, coordinator, i16::from(settings.ui.volume_step));
        }
        KeyCode::Char('-') => {
            adjust_volume(app, coordinator, -i16::from(settings.ui.volume_step));
        }
        KeyCode::Char('v') => app.drag.volume = !app.drag.volume,
        KeyCode::Left => scrub(app, coordinator, -(settings.player.seek_step_secs as i64)),
        KeyCode::Right => scrub(app, coordinator, settings.player.seek_step_secs as i64),
        KeyCode::Esc => {
            app.cancel_seek_drag();
            app.drag.volume = false;
            app.status = None;
        }
        _ => {}
    }
    false
}

fn handle_search_key<F: EngineFactory>(
    code: KeyCode,
    app: &mut App,
    coordinator: &mut Coordinator<F>,
    sync: &mut PositionSync,
    state: &mut EventLoopState,
) {
    match code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Down => app.select_next(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Enter => {
            // If there are no visible results, do nothing.
            if app.display_indices().is_empty() {
                return;
            }
            app.exit_search();
            play_selected(app, coordinator, sync, state);
        }
        KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
        _ => {}
    }
}

fn handle_add_key(code: KeyCode, app: &mut App, settings: &config::Settings) {
    match code {
        KeyCode::Esc => app.cancel_add(),
        KeyCode::Backspace => {
            app.add_input.pop();
        }
        KeyCode::Enter => {
            let input = app.take_add_input();
            let input = input.trim();
            if input.is_empty() {
                return;
            }

            let files = collect_media_files(&[PathBuf::from(input)], &settings.library);
            if files.is_empty() {
                app.set_status(format!("no media files found under {input}"));
            } else {
                let count = files.len();
                app.library.add(files);
                app.library.save();
                app.ensure_selection_visible();
                app.set_status(format!("added {count} file(s)"));
            }
        }
        KeyCode::Char(c) if !c.is_control() => app.add_input.push(c),
        _ => {}
    }
}

/// Queue the currently displayed (possibly filtered) list and start the
/// entry under the selection.
fn play_selected<F: EngineFactory>(
    app: &mut App,
    coordinator: &mut Coordinator<F>,
    sync: &mut PositionSync,
    state: &mut EventLoopState,
) {
    let display = app.display_paths();
    if display.is_empty() {
        return;
    }
    let start = app.selected.min(display.len() - 1);
    state.queue = MediaQueue::build_from(display, start);

    if let Some(path) = state.queue.current().map(Path::to_path_buf) {
        start_track(app, coordinator, sync, &path);
    }
}

fn start_track<F: EngineFactory>(
    app: &mut App,
    coordinator: &mut Coordinator<F>,
    sync: &mut PositionSync,
    path: &Path,
) {
    coordinator.select_track(path);
    app.cancel_seek_drag();
    app.slider_secs = 0;

    if coordinator.is_playing() {
        sync.start(Instant::now());
        app.select_display_path(path);
    } else {
        sync.stop();
        app.set_status(format!("could not play {}", path.display()));
    }
}

fn skip<F: EngineFactory>(
    app: &mut App,
    coordinator: &mut Coordinator<F>,
    sync: &mut PositionSync,
    state: &mut EventLoopState,
    forward: bool,
) {
    let path = if forward {
        state.queue.next()
    } else {
        state.queue.previous()
    }
    .map(Path::to_path_buf);

    if let Some(path) = path {
        start_track(app, coordinator, sync, &path);
    }
}

fn toggle_pause<F: EngineFactory>(
    app: &mut App,
    coordinator: &mut Coordinator<F>,
    sync: &mut PositionSync,
    state: &mut EventLoopState,
) {
    match coordinator.state() {
        PlaybackState::Playing => coordinator.pause(),
        PlaybackState::Paused | PlaybackState::Stopped => {
            coordinator.play();
            if coordinator.is_playing() && !sync.is_running() {
                sync.start(Instant::now());
            }
        }
        // Nothing was ever selected: treat play as "play the selection".
        PlaybackState::Idle => play_selected(app, coordinator, sync, state),
    }
}

fn adjust_volume<F: EngineFactory>(app: &mut App, coordinator: &mut Coordinator<F>, delta: i16) {
    let target = (i16::from(coordinator.volume()) + delta).clamp(0, 100) as u8;
    coordinator.set_volume(target);
    app.volume = target;
}

fn scrub<F: EngineFactory>(app: &mut App, coordinator: &mut Coordinator<F>, delta: i64) {
    // Scrubbing needs a live handle for the eventual seek to land on.
    if !matches!(
        coordinator.state(),
        PlaybackState::Playing | PlaybackState::Paused
    ) {
        return;
    }
    app.begin_seek_drag();
    app.scrub_by(delta, coordinator.duration_secs());
}
