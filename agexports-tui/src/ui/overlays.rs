//! Overlay widgets: welcome and key help.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Startup overlay with dataset facts.
pub fn render_welcome(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" US Agricultural Exports (2011) ")
        .title_style(theme::accent_bold());

    let table = app.ctx.table();
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} states", table.len()), theme::text()),
            Span::styled(
                format!(", {} categories", app.ctx.registry().len()),
                theme::text(),
            ),
        ]),
        Line::from(Span::styled(app.source_label.as_str(), theme::muted())),
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Pick a category with [ and ]",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Click states on the map (or move with arrows, Enter to toggle)",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Tab to the breakdown and use j/k to highlight a category",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::text())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

const KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "move focus between panes"),
    ("[ ]", "previous / next category"),
    ("h j k l, arrows", "move the cursor in the focused pane"),
    ("Enter, Space", "select or deselect the state under the cursor"),
    ("mouse click", "select or deselect a state"),
    ("x", "clear the selection"),
    ("Esc", "leave the breakdown pane"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines = vec![Line::from("")];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<18}"), theme::accent()),
            Span::styled(*action, theme::text()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Hovering a sector highlights that category in every panel.",
        theme::muted(),
    )));

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}
