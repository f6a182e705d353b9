mod app;
mod banner;
mod cli;
mod config;
mod desktop_notifications;
mod error;
mod handlers;
mod logging;
mod model;
mod services;
mod state;
mod ui;

use app::App;
use clap::Parser;
use cli::Cli;
use config::ClientConfig;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::AppResult;
use ratatui::{backend::CrosstermBackend, Terminal};
use services::BackendEvent;
use state::ui::TICK_MS;
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Application events
enum AppEvent {
    Terminal(CEvent),
    Backend(BackendEvent),
    Tick,
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    if cli.write_default_config {
        let path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
        let mut config = ClientConfig::default();
        config.apply_cli(&cli);
        config.save_to(&path)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    let config = ClientConfig::resolve(&cli)?;
    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init_logging(&log_path, &config.log_filter)?;
    info!("Starting client, login email policy: {:?}", config.login_email_policy());

    let mut terminal = setup_terminal()?;

    let result = run(&mut terminal, config).await;

    // Cleanup runs even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Client exited with error: {}", e);
    }
    info!("Client shut down");
    result
}

/// Raw mode plus alternate screen. A failure after raw mode is on leaves
/// the terminal as it was found.
fn setup_terminal() -> AppResult<Term> {
    enable_raw_mode()?;
    let enter = || -> AppResult<Term> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(Terminal::new(CrosstermBackend::new(stdout))?)
    };
    restore_on_error(enter(), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

fn restore_on_error<T>(result: AppResult<T>, restore: impl FnOnce()) -> AppResult<T> {
    if let Err(e) = &result {
        error!("Terminal setup failed: {}", e);
        restore();
    }
    result
}

async fn run(terminal: &mut Term, config: ClientConfig) -> AppResult<()> {
    let (backend_tx, mut backend_rx) = mpsc::unbounded_channel::<BackendEvent>();
    let mut app = App::new(config, backend_tx);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Spawn terminal event handler
    let event_tx_clone = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
        loop {
            interval.tick().await;

            // Check for terminal events (non-blocking)
            if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if event_tx_clone.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
            }

            if event_tx_clone.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Forward backend completions into the main loop
    tokio::spawn(async move {
        while let Some(event) = backend_rx.recv().await {
            if event_tx.send(AppEvent::Backend(event)).is_err() {
                break;
            }
        }
    });

    while !app.ui.should_quit {
        terminal.draw(|f| ui::ui(f, &app))?;

        if let Some(event) = event_rx.recv().await {
            match event {
                AppEvent::Terminal(CEvent::Key(key)) => handlers::handle_key_event(key, &mut app),
                AppEvent::Terminal(_) => {}
                AppEvent::Backend(event) => app.handle_backend_event(event),
                AppEvent::Tick => app.on_tick(),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn failed_setup_restores_the_terminal() {
        let mut restored = false;
        let result: AppResult<()> =
            restore_on_error(Err(AppError::Logging("no tty".to_string())), || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn successful_setup_keeps_the_terminal() {
        let mut restored = false;
        let result = restore_on_error(Ok(7), || restored = true);
        assert_eq!(result.unwrap(), 7);
        assert!(!restored);
    }
}
