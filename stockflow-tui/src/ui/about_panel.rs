//! About Me: static description of the dashboard.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use stockflow_core::domain::Ticker;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let tickers = Ticker::all()
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let lines = vec![
        Line::from(Span::styled("About Me", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} fetches daily historical prices for a fixed list of large-cap \
                 stocks, previews them as a table and saves them as CSV.",
                app.config.page_title
            ),
            theme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled("Tickers", theme::neutral())),
        Line::from(Span::styled(tickers, theme::muted())),
        Line::from(""),
        Line::from(Span::styled("Exports", theme::neutral())),
        Line::from(vec![
            Span::styled("Files are written to ", theme::muted()),
            Span::styled(app.config.download_dir.display().to_string(), theme::accent()),
            Span::styled(" as <TICKER>_data.csv", theme::muted()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Market data courtesy of Yahoo Finance.",
            theme::muted(),
        )),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
