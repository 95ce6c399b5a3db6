// Status bar component
//
// Renders the clipboard backend and the key hints at the bottom.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Key hints are dropped on narrow terminals.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let backend = format!(" 📋 {}", app.copy.backend_name());
    let hints = " │ y copy │ Y copy plain │ n copy name │ l logs │ q quit";

    let status_text = if area.width >= 80 {
        format!("{}{}", backend, hints)
    } else {
        backend
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.muted))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.muted)),
        );

    f.render_widget(status, area);
}
