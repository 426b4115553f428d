mod app;
mod config;
mod events;
mod platform;
mod saavn;
mod ui;
#[cfg(test)]
mod tests;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    app::{controller::PanelController, App},
    config::Config,
    platform::SystemPlatform,
    saavn::client::SaavnClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load()?;

    // ── Logging setup ────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("moodtunes=info"));
    // Write logs to file so they don't corrupt the TUI
    match std::fs::File::create(&config.log_file) {
        Ok(file) => fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        Err(e) => eprintln!("moodtunes: logging disabled, cannot create {}: {e}", config.log_file),
    }

    // ── Service + platform ───────────────────────────────────────────────────
    let client = SaavnClient::new(&config)?;
    info!("Using JioSaavn API at {}", config.api_url);
    if config.emotion.is_none() {
        warn!("No emotion label given, prompting for one");
    }
    let platform = SystemPlatform::new(reqwest::Client::new());
    let controller = PanelController::new(Arc::new(client), Arc::new(platform));

    // ── Terminal setup ────────────────────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // ── Panic hook to restore terminal on crash ──────────────────────────────
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        original_hook(panic_info);
    }));

    // ── Run the panel ────────────────────────────────────────────────────────
    let result = {
        let mut app = App::new(controller);
        app.run(&mut terminal, config.emotion.clone()).await
    };

    // ── Restore terminal ─────────────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("App error: {e:?}");
        eprintln!("\n\x1b[31mmoodtunes crashed:\x1b[0m {e}");
        eprintln!("Check {} for details", config.log_file);
    }

    Ok(())
}
