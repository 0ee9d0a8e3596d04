//! Bottom status bar: section hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Fetch Stock Data 2:About Me ?:Help q:Quit",
        theme::muted(),
    ));

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::styled(msg.as_str(), theme::status(*level)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
