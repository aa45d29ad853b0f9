mod app;
mod capacity;
mod carousel;
mod config;
mod days;
mod input;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::app::App;
use crate::config::{Cli, Settings};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.debug)?;
    let settings = Settings::load(&cli)?;
    tracing::debug!(?settings, "settings loaded");

    // Set up terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    if let Err(ref e) = result {
        tracing::error!("exited with error: {:#}", e);
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, settings: &Settings) -> Result<()> {
    let (columns, _) = terminal::size()?;
    let mut app = App::new(settings, capacity::viewport_width(columns));

    loop {
        app.tick(Instant::now());

        // Draw the UI
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Check if we should quit
        if app.should_quit {
            break;
        }

        // Handle events
        if event::poll(POLL_TIMEOUT)? {
            input::handle_event(&mut app, event::read()?);
        }
    }

    Ok(())
}

/// Log to a file under the data directory; the terminal belongs to the UI.
///
/// `RUST_LOG` overrides the default filter.
fn init_logging(debug: bool) -> Result<Option<WorkerGuard>> {
    let Some(log_dir) = config::log_dir() else {
        return Ok(None);
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log dir: {}", log_dir.display()))?;

    let mut log_file_opts = OpenOptions::new();
    log_file_opts.create(true).append(true);

    // Only readable and writable by the current user
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        log_file_opts.mode(0o600);
    }

    let log_path = log_dir.join("day-carousel.log");
    let log_file = log_file_opts
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
    let (writer, guard) = non_blocking(log_file);

    let default_filter = if debug {
        "day_carousel=debug"
    } else {
        "day_carousel=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_ansi(false)
                .with_filter(env_filter),
        )
        .try_init()
        .context("Failed to install logger")?;

    Ok(Some(guard))
}
