//! Top-level UI layout: sidebar, section panel, status bar.

pub mod about_panel;
pub mod fetch_panel;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use stockflow_core::config::PageLayout;

use crate::app::{AppState, Overlay, Section};
use crate::theme;

const SIDEBAR_WIDTH: u16 = 32;
const CENTERED_MAX_WIDTH: u16 = 100;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(Block::default().style(theme::base()), f.area());

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let content_area = if app.sidebar_visible {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(main_area);
        sidebar::render(f, cols[0], app);
        cols[1]
    } else {
        main_area
    };

    let content_area = match app.config.layout {
        PageLayout::Wide => content_area,
        PageLayout::Centered => centered_columns(CENTERED_MAX_WIDTH, content_area),
    };
    draw_section(f, content_area, app);

    status_bar::render(f, status_area, app);

    match &app.overlay {
        Overlay::DateEntry { bound, input } => {
            overlays::render_date_entry(f, main_area, *bound, input)
        }
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::None => {}
    }
}

fn draw_section(f: &mut Frame, area: Rect, app: &AppState) {
    let section = app.section;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} {} ", app.config.page_title, app.config.page_icon))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match section {
        Section::FetchStockData => fetch_panel::render(f, inner, app),
        Section::AboutMe => about_panel::render(f, inner, app),
    }
}

/// Limit `area` to at most `max_width` columns, horizontally centered.
pub fn centered_columns(max_width: u16, area: Rect) -> Rect {
    if area.width <= max_width {
        return area;
    }
    let margin = (area.width - max_width) / 2;
    Rect {
        x: area.x + margin,
        width: max_width,
        ..area
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
