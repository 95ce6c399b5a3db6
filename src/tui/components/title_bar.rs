// Title bar component
//
// Renders the app title with the number of entries and the copied flag.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let flash = if app.is_copied() { "  ✓ copied" } else { "" };
    let title_text = format!(" clipflash ──── {} entries{}", app.entries.len(), flash);

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.highlight)),
        );

    f.render_widget(title, area);
}
