//! Category chips. The chosen one is filled with its legend color.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Categories;
    let chosen = app.session.category();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(" Category [ / ] ")
        .title_style(theme::panel_title(focused));

    let mut spans: Vec<Span> = Vec::new();
    for category in app.ctx.registry().iter() {
        let label = format!(" {} ", category.name);
        let span = if chosen == Some(category.name.as_str()) {
            Span::styled(
                label,
                Style::default()
                    .bg(theme::to_color(category.color))
                    .fg(theme::contrast_fg(category.color))
                    .add_modifier(Modifier::BOLD),
            )
        } else if category.aggregate {
            Span::styled(label, theme::text())
        } else {
            Span::styled(label, theme::muted())
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    if chosen.is_none() {
        spans.push(Span::styled("(no category)", theme::warning()));
    }

    let para = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
