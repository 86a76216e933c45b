//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::session::ConnectionStatus;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let status = app.session.status();
    let status_color = match status {
        ConnectionStatus::Live => Color::Green,
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Offline => Color::Red,
    };

    let status_text = format!(" {} ", status.label());
    let symbol_text = app
        .session
        .snapshot()
        .and_then(|s| s.symbol.as_deref())
        .map(|symbol| format!(" {symbol} "))
        .unwrap_or_default();

    // Right-align the key help in whatever width is left
    let used = status_text.len() + 1 + symbol_text.len();
    let help = format!(
        "{:>width$}",
        " f fullscreen  q quit ",
        width = (area.width as usize).saturating_sub(used)
    );

    let line = Line::from(vec![
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("│"),
        Span::styled(symbol_text, Style::default().fg(Color::White)),
        Span::raw(help),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::Black).fg(Color::DarkGray));
    frame.render_widget(para, area);
}
