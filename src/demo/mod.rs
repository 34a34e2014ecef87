// Demo module - interactive terminal demo of the selection container
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Routing clicks into the container and rendering the result

pub mod app;
pub mod script;
pub mod toast;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use selectkit::config::Config;
use selectkit::logging::LogBuffer;
use std::io;
use std::time::Duration;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done, also when the loop fails.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let mut app = App::new(&config, log_buffer).context("Failed to build demo container")?;

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Redraws when input arrives or on each tick. Selection changes made by
/// clicks are visible on the very next draw.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        // Drawing can fail if an item ends up outside its container's scope
        let mut drawn = Ok(());
        terminal
            .draw(|f| drawn = app.draw(f))
            .context("Failed to draw terminal")?;
        drawn.context("Failed to render selection")?;

        tokio::select! {
            // Keyboard or mouse input
            input = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            } => {
                match input.context("Failed to read terminal event")? {
                    Some(Event::Key(key)) => app.handle_key(key),
                    Some(Event::Mouse(mouse)) => {
                        app.handle_mouse(mouse).context("Failed to route click")?;
                    }
                    _ => {}
                }
            }

            // Periodic tick to expire the toast
            _ = tick_interval.tick() => {
                app.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
