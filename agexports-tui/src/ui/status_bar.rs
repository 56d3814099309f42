//! Bottom status bar: key hints for the focused pane, last status message,
//! dataset origin.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Focus, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(format!(" {} ", app.focus.label()), theme::accent_bold()));
    spans.push(Span::styled(hints(app.focus), theme::muted()));
    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
        };
        spans.push(Span::styled(msg.as_str(), style));
        spans.push(Span::raw(" | "));
    }

    spans.push(Span::styled(app.source_label.as_str(), theme::muted()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Categories => "h/l:category Tab:focus x:clear ?:help q:quit",
        Focus::Map => "arrows:move Enter:toggle [/]:category x:clear ?:help q:quit",
        Focus::Breakdown => "h/l:panel j/k:sector Esc:map x:clear ?:help q:quit",
    }
}
