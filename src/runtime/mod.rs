//! Runtime wiring: configuration, terminal setup and the event loop.

use std::time::Duration;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::library::{Library, LibraryStore};
use crate::player::{Coordinator, PositionSync, RodioOutput};

mod event_loop;
mod settings;

pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();

    let library = Library::open(LibraryStore::new(settings.library.media_file.clone()));

    let output = RodioOutput::new()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("no usable audio output")?;
    let mut coordinator = Coordinator::new(output, settings.player.default_volume);
    let mut sync = PositionSync::new(Duration::from_millis(settings.player.sync_interval_ms));

    let mut app = App::new(library, settings.player.default_volume);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result =
        event_loop::run(&mut terminal, &settings, &mut app, &mut coordinator, &mut sync);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Quit flushes persisted state and releases the engine handle.
    sync.stop();
    app.library.save();
    coordinator.shutdown();

    run_result
}
