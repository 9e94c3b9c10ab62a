//! Terminal UI: one character at a time, with a tab per profile section.

pub mod app;
pub mod events;
pub mod services;
pub mod theme;
pub mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::config::TuiConfig;
use app::AppState;
use services::Services;

/// Set up the terminal, run the event loop, and restore the terminal even
/// when the loop fails.
pub async fn run(config: &TuiConfig, services: Services) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(event_rx, event_tx, services);
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tick_rate_ms.max(10)))
        .await;

    disable_raw_mode()?;
    if config.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
