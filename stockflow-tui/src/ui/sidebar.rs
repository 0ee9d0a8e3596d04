//! Sidebar: branding, welcome note, section selector.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, Section};
use crate::theme;

const WELCOME: &str = "Welcome to StockFlow, a platform for fetching and \
downloading stock market data easily. Start exploring the market now!";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("{} 💹", app.config.page_title),
            theme::accent_bold(),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(WELCOME, theme::text())),
        Line::from(""),
        Line::from(Span::styled("─".repeat(inner.width as usize), theme::muted())),
        Line::from(Span::styled("Select a Section", theme::neutral())),
    ];

    for (i, section) in Section::ALL.iter().enumerate() {
        let is_active = *section == app.section;
        let marker = if is_active { "▸" } else { " " };
        let style = if is_active {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} [{}] ", i + 1), theme::muted()),
            Span::styled(section.label(), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Tab]switch [s]hide [?]help",
        theme::muted(),
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(para, inner);
}
