//! Entries panel component
//!
//! The main list: one row per identifier with its copy icon, kind tag,
//! name and shortened value. The icon swaps to a check mark on the row
//! that was last copied while the copy flag is on.

use crate::entries::shorten;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Columns the value may use before it gets shortened
const VALUE_HEAD: usize = 12;
const VALUE_TAIL: usize = 12;

/// Render the entries list
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .title(" Entries ");

    if app.entries.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("  Nothing to copy yet."),
            Line::from("  Pass identifiers as arguments (name=value or value)"),
            Line::from("  or add [[entries]] to the config file."),
        ])
        .style(Style::default().fg(theme.muted))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    // Wide enough for the full value: show it unshortened
    let full_value = area.width as usize > 80;

    let rows: Vec<Row> = app
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let icon = app.icon_for(idx);
            let icon_style = if icon == crate::tui::app::COPIED_ICON {
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            let value = if full_value {
                entry.value.clone()
            } else {
                shorten(&entry.value, VALUE_HEAD, VALUE_TAIL)
            };

            Row::new(vec![
                Cell::from(icon).style(icon_style),
                Cell::from(entry.kind.tag()).style(Style::default().fg(theme.muted)),
                Cell::from(entry.name.clone().unwrap_or_default()),
                Cell::from(value),
            ])
            .style(Style::default().fg(theme.foreground))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(9),
            Constraint::Percentage(25),
            Constraint::Fill(1),
        ],
    )
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::copy::{ChannelNotifier, Clipboard, CopyUnit, Osc52Clipboard};
    use crate::entries::Entry;
    use crate::logging::LogBuffer;
    use crate::tui::app::{CopyTarget, COPIED_ICON, COPY_ICON};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn test_app() -> App {
        let (notifier, _rx) = ChannelNotifier::channel();
        let clipboard: Box<dyn Clipboard> =
            Box::new(Osc52Clipboard::with_writer(Box::new(std::io::sink())));
        let unit = Arc::new(CopyUnit::new(clipboard, notifier));
        let entries = vec![
            Entry::new(Some("treasury".to_string()), "51234567"),
            Entry::new(Some("fees".to_string()), "51234568"),
        ];
        App::new(entries, unit, &Config::default(), LogBuffer::new())
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_copied_row_shows_check_mark() {
        let mut app = test_app();
        app.select_next();
        assert!(app.start_copy(CopyTarget::Value));
        for _ in 0..100 {
            if app.last_copied.is_some() {
                break;
            }
            tokio::task::yield_now().await;
            app.reap_copies().await;
        }
        assert_eq!(app.last_copied, Some(1));

        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal.draw(|f| render(f, f.area(), &app)).unwrap();

        // Row 0 is the border
        let first = row(&terminal, 1);
        let second = row(&terminal, 2);
        assert!(first.contains("treasury") && first.contains(COPY_ICON), "{:?}", first);
        assert!(!first.contains(COPIED_ICON), "{:?}", first);
        assert!(second.contains("fees") && second.contains(COPIED_ICON), "{:?}", second);
    }

    #[tokio::test]
    async fn test_rows_show_copy_icon_before_any_copy() {
        let app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal.draw(|f| render(f, f.area(), &app)).unwrap();

        assert!(row(&terminal, 1).contains(COPY_ICON));
        assert!(row(&terminal, 2).contains(COPY_ICON));
        assert!(!row(&terminal, 2).contains(COPIED_ICON));
    }
}
