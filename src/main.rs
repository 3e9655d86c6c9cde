use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod library;
mod player;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    // Log to stderr; the TUI owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    runtime::run()
}
