// UI rendering - frame layout
//
// Layout, top to bottom: title bar, entries list, optional logs panel,
// status bar. The toast is drawn last so it sits on top of everything.

use super::app::App;
use super::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
    if app.show_logs {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);
    components::render_entries(f, chunks[1], app);
    if app.show_logs {
        components::render_logs_panel(f, chunks[2], app);
    }
    components::render_status(f, chunks[chunks.len() - 1], app);

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    // Clear expired toast after render
    app.clear_expired_toast();
}
