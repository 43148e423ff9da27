//! Terminal setup and teardown
//!
//! Initializes and restores the terminal, including a panic hook that
//! restores it on crash.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::error::{RegisterError, RegisterResult};
use crate::storage::LocalStore;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> RegisterResult<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> RegisterResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the wizard until the user quits or submits the last step
pub fn run_wizard<S: LocalStore>(app: &mut App<S>) -> RegisterResult<()> {
    let mut terminal = init_terminal()?;
    tracing::info!(route = %app.route, session = %app.session_id(), "wizard started");

    let result = event_loop(&mut terminal, app);

    // Restore even when the loop failed
    restore_terminal()?;
    tracing::info!(completed = app.completed, "wizard closed");

    result
}

fn event_loop<S: LocalStore>(terminal: &mut Tui, app: &mut App<S>) -> RegisterResult<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;

        let event = events
            .next()
            .map_err(|_| RegisterError::Tui("terminal event stream closed".into()))?;
        handle_event(app, event)?;
    }

    Ok(())
}
