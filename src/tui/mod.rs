// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, copy notifications)
// - Rendering the UI

pub mod app;
pub mod components;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::copy::{clipboard_from_backend, ChannelNotifier, CopyUnit, Notification};
use crate::entries::Entry;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, CopyTarget};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done.
pub async fn run_tui(entries: Vec<Entry>, config: Config, log_buffer: LogBuffer) -> Result<()> {
    let (notifier, mut notifications) = ChannelNotifier::channel();
    let clipboard = clipboard_from_backend(config.copy.clipboard);
    let unit = Arc::new(CopyUnit::with_settings(
        clipboard,
        notifier,
        config.copy.settings(),
    ));
    tracing::info!(
        "Clipboard backend: {}, reset after {}ms",
        unit.backend_name(),
        unit.settings().reset_delay.as_millis()
    );

    let mut app = App::new(entries, unit, &config, log_buffer);
    tracing::debug!("Theme: {}", app.theme.name);

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut notifications).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// This loop handles three types of events:
/// 1. Keyboard input (for navigation and copy commands)
/// 2. Timer ticks (for redraws: toast expiry, icon reset)
/// 3. Copy notifications (shown as toasts)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    notifications: &mut mpsc::UnboundedReceiver<Notification>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        app.reap_copies().await;

        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {}

            Some(notification) = notifications.recv() => {
                app.handle_notification(notification);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle a key press
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    let key = key_event.code;
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }

        // Navigation
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),

        // Copy to clipboard: y/Enter = kind label, Y = default label, n = name
        KeyCode::Char('y') | KeyCode::Enter => {
            if app.debounce(key) {
                app.start_copy(CopyTarget::Value);
            }
        }
        KeyCode::Char('Y') => {
            if app.debounce(key) {
                app.start_copy(CopyTarget::ValuePlain);
            }
        }
        KeyCode::Char('n') => {
            if app.debounce(key) {
                app.start_copy(CopyTarget::Name);
            }
        }

        KeyCode::Char('l') => {
            if app.debounce(key) {
                app.toggle_logs();
            }
        }
        _ => {}
    }
}
