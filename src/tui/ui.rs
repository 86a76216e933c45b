//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders, Clear},
};

use super::app::App;
use super::components::ticker_panel::MATRIX_DIM;
use super::components::{log_panel, status_bar, ticker_panel};

/// Largest size of the centred terminal panel.
const PANEL_WIDTH: u16 = 72;
const PANEL_HEIGHT: u16 = 20;

/// Renders the entire application UI.
pub fn render<C>(frame: &mut Frame, app: &App<C>) {
    let area = frame.area();

    // Backdrop first so every panel draws over it
    frame.render_widget(&app.rain, area);

    if app.fullscreen {
        render_fullscreen(frame, area, app);
    } else {
        render_terminal(frame, area, app);
    }
}

/// Renders the bordered terminal panel and status bar.
fn render_terminal<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Rain + panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panel = centered(main_layout[0], PANEL_WIDTH, PANEL_HEIGHT);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(MATRIX_DIM));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Price
            Constraint::Length(3), // Change + status
            Constraint::Min(2),    // Rolling log
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    ticker_panel::render_header(frame, sections[0], app);
    ticker_panel::render_price(frame, sections[1], app);
    ticker_panel::render_stats(frame, sections[2], app);
    log_panel::render(frame, sections[3], app);
    ticker_panel::render_footer(frame, sections[4]);

    status_bar::render(frame, main_layout[1], app);
}

/// Renders only the price over the backdrop.
fn render_fullscreen<C>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let width = app.session.formatted_price().len() as u16 + 4;
    let box_area = centered(area, width, 3);
    frame.render_widget(Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MATRIX_DIM));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);
    ticker_panel::render_price(frame, inner, app);
}

/// Returns a rect of at most `width` x `height` centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
