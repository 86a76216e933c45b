//! Ticker header, price and stats rows.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::session::PriceDirection;
use crate::tui::app::App;

/// Bright terminal green used for live values.
pub const MATRIX_GREEN: Color = Color::Rgb(0, 255, 65);

/// Dim green used for labels and chrome.
pub const MATRIX_DIM: Color = Color::Rgb(0, 143, 17);

const ASSET_LABEL: &str = "DETECTING_ASSET: BITCOIN_BTC_USDT";
const FOOTER: &str = "KERNEL: 5.4.0-MATRIX-RT-AMD64 // USER: ROOT@MAINFRAME";

/// Renders the two-line header with the blinking cursor.
pub fn render_header<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let cursor = if app.cursor_visible() { "█" } else { " " };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "SYSTEM_OVERRIDE: MONITORING_STREAM ",
                Style::default()
                    .fg(MATRIX_GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(cursor, Style::default().fg(MATRIX_GREEN)),
        ]),
        Line::from(Span::styled(ASSET_LABEL, Style::default().fg(MATRIX_DIM))),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Renders the price, styled by the current pulse.
pub fn render_price<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let para = Paragraph::new(Line::from(Span::styled(
        app.session.formatted_price(),
        price_style(app.session.direction()),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Renders the 24h change and protocol status side by side.
pub fn render_stats<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let change_color = if app.session.change_is_negative() {
        Color::Red
    } else {
        MATRIX_GREEN
    };

    render_stat(
        frame,
        columns[0],
        "24H_VOLATILITY",
        app.session.formatted_change(),
        change_color,
    );
    render_stat(
        frame,
        columns[1],
        "PROTOCOL_STATUS",
        app.session.status().protocol_label(),
        MATRIX_GREEN,
    );
}

fn render_stat(frame: &mut Frame, area: Rect, label: &str, value: &str, color: Color) {
    let lines = vec![
        Line::from(Span::styled(label, Style::default().fg(MATRIX_DIM))),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Renders the host line along the bottom of the panel.
pub fn render_footer(frame: &mut Frame, area: Rect) {
    let para = Paragraph::new(Line::from(Span::styled(
        FOOTER,
        Style::default().fg(MATRIX_DIM),
    )));
    frame.render_widget(para, area);
}

/// Maps the pulse to a price style: white on a rise, red on a fall,
/// green at rest.
pub fn price_style(direction: PriceDirection) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match direction {
        PriceDirection::Up => base.fg(Color::White),
        PriceDirection::Down => base.fg(Color::Red),
        PriceDirection::Neutral => base.fg(MATRIX_GREEN),
    }
}
