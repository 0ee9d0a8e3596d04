//! Fetch Stock Data: ticker and date pickers, fetch status, result table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use stockflow_core::domain::{PriceSeries, COLUMNS};
use stockflow_core::workflow::{
    ResultView, EMPTY_RESULT_WARNING, FETCHING_MESSAGE, SUCCESS_MESSAGE,
};

use crate::app::{AppState, Field};
use crate::theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // heading
            Constraint::Length(4), // inputs
            Constraint::Length(2), // fetch status
            Constraint::Min(3),    // table
            Constraint::Length(1), // actions
        ])
        .split(area);

    render_heading(f, chunks[0]);
    render_inputs(f, chunks[1], app);
    render_status(f, chunks[2], app);
    if let Some(series) = app.view().series() {
        render_table(f, chunks[3], series, app.table_scroll);
    }
    render_actions(f, chunks[4], app);
}

fn render_heading(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Welcome to StockFlow 💰", theme::accent_bold())),
        Line::from(Span::styled(
            "Fetch and Download Stock Data Effortlessly",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "🔍 Fetch Historical Stock Data",
            theme::neutral().add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn input_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let value_style = if focused {
        theme::accent().add_modifier(Modifier::REVERSED)
    } else {
        theme::accent()
    };
    Line::from(vec![
        Span::styled(marker, theme::accent()),
        Span::styled(format!("{label:<22}"), theme::muted()),
        Span::styled(format!(" ◂ {value} ▸ "), value_style),
    ])
}

fn render_inputs(f: &mut Frame, area: Rect, app: &AppState) {
    let input = &app.input;
    let focus = input.focus;
    let mut lines = vec![
        input_line(
            "Select a Stock Ticker",
            input.ticker.to_string(),
            focus == Field::Ticker,
        ),
        input_line(
            "Start Date:",
            input.range.start.format("%Y-%m-%d").to_string(),
            focus == Field::StartDate,
        ),
        input_line(
            "End Date:",
            input.range.end.format("%Y-%m-%d").to_string(),
            focus == Field::EndDate,
        ),
    ];
    if input.range.is_inverted() {
        lines.push(Line::from(Span::styled(
            "  Start date is after end date",
            theme::warning(),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_status(f: &mut Frame, area: Rect, app: &AppState) {
    let line = if app.is_fetching() {
        let frame = SPINNER[app.tick % SPINNER.len()];
        Line::from(vec![
            Span::styled(format!("{frame} "), theme::accent()),
            Span::styled(FETCHING_MESSAGE, theme::warning()),
        ])
    } else {
        match app.view() {
            ResultView::Idle => Line::from(Span::styled(
                "Press [f] to Fetch Stock Data",
                theme::muted(),
            )),
            ResultView::EmptyResult { .. } => Line::from(Span::styled(
                format!("⚠ {EMPTY_RESULT_WARNING}"),
                theme::warning(),
            )),
            ResultView::Populated { series, .. } => Line::from(vec![
                Span::styled(format!("🎉 {SUCCESS_MESSAGE}"), theme::positive()),
                Span::styled(
                    format!("  {} rows", series.row_count()),
                    theme::muted(),
                ),
            ]),
        }
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, series: &PriceSeries, scroll: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(
            " {} [{}-{}/{}] ",
            series.ticker,
            (scroll + 1).min(series.row_count()),
            (scroll + visible_rows(area)).min(series.row_count()),
            series.row_count()
        ))
        .title_style(theme::accent());

    let header = Row::new(
        COLUMNS
            .iter()
            .map(|c| Cell::from(*c).style(theme::accent_bold())),
    );

    let palette = theme::Theme::default();
    let rows = series
        .bars
        .iter()
        .skip(scroll)
        .take(visible_rows(area))
        .map(|bar| {
            let color = palette.change_color(bar.open, bar.close);
            let cells = bar.display_cells();
            Row::new(cells.into_iter().enumerate().map(move |(i, cell)| {
                let style = if i == 0 {
                    theme::text()
                } else {
                    theme::text().fg(color)
                };
                Cell::from(cell).style(style)
            }))
        });

    let widths = [
        Constraint::Length(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(2);
    f.render_widget(table, area);
}

/// Data rows that fit below the border and header.
fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

fn render_actions(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(
        "[j/k]field [h/l]change [H/L]±month [e]type date [f]etch",
        theme::muted(),
    )];
    if app.view().can_export() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "💾 [d] Download Data as CSV",
            theme::positive().add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(path) = &app.last_export {
        spans.push(Span::styled(
            format!("  saved {}", path.display()),
            theme::muted(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_rows_excludes_chrome() {
        assert_eq!(visible_rows(Rect::new(0, 0, 80, 13)), 10);
        assert_eq!(visible_rows(Rect::new(0, 0, 80, 2)), 0);
    }
}
