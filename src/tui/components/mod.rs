// Components module - reusable UI building blocks
//
// - Title bar: app name and entry count
// - Entries panel: the copyable identifiers with their copy icon
// - Logs panel: recent system log entries
// - Status bar: clipboard backend and key hints
// - Toast: transient copy confirmations
//
// Each component is a focused, single-responsibility module.

pub mod entries_panel;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the entries list (convenience wrapper)
pub fn render_entries(f: &mut Frame, area: Rect, app: &App) {
    entries_panel::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the logs panel (convenience wrapper)
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    logs_panel::render(f, area, app);
}
