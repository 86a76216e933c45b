//! Rolling log panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::ticker_panel::MATRIX_DIM;
use crate::tui::app::App;

/// Renders the rolling log, newest entry on top.
pub fn render<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(MATRIX_DIM));

    let lines: Vec<Line> = app
        .session
        .log()
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp),
                    Style::default().fg(MATRIX_DIM).add_modifier(Modifier::DIM),
                ),
                Span::styled(entry.message.as_str(), Style::default().fg(MATRIX_DIM)),
            ])
        })
        .collect();

    let para = Paragraph::new(lines).block(block);
    frame.render_widget(para, area);
}
