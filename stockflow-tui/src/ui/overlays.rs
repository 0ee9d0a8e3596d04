//! Overlay widgets: date entry and key help.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use stockflow_core::domain::RangeBound;

use crate::theme;
use crate::ui::centered_rect;

/// Typed date entry for one end of the range.
pub fn render_date_entry(f: &mut Frame, area: Rect, bound: RangeBound, input: &str) {
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let label = match bound {
        RangeBound::Start => "Start Date",
        RangeBound::End => "End Date",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {label} [Enter]set [Esc]cancel "))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Enter a date (YYYY-MM-DD):", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(text), inner);
}

const HELP: &[(&str, &str)] = &[
    ("1 / 2, Tab", "switch section"),
    ("s", "show or hide the sidebar"),
    ("j / k", "move between ticker, start and end"),
    ("h / l", "previous / next ticker, or date -/+ 1 day"),
    ("H / L", "date -/+ 1 month"),
    ("e, Enter", "type a date"),
    ("f", "fetch stock data"),
    ("d", "download data as CSV"),
    ("PgUp / PgDn", "scroll the table"),
    ("Home / End", "first / last row"),
    ("q, Ctrl+C", "quit"),
];

/// Key reference overlay.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    for (keys, action) in HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("{keys:<14}"), theme::accent()),
            Span::styled(*action, theme::muted()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss...",
        theme::neutral(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}
