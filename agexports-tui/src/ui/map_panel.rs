//! Choropleth map drawn as a tile-grid cartogram.
//!
//! Each state is one tile filled from the Blues scale. Selected states get
//! an orange bold code; the keyboard cursor is shown reversed while the map
//! has focus.

use agexports_core::color::ColorScale;
use agexports_core::figure::ChoroplethFigure;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme::{self, Theme};
use crate::tile_grid::{self, GRID_COLS, GRID_ROWS};
use crate::ui::format_value;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Map;
    let title = match &app.view.choropleth {
        Some(fig) => format!(" {} ", fig.title),
        None => " Map ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(title)
        .title_style(theme::panel_title(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(fig) = &app.view.choropleth else {
        app.map_area.set(Rect::default());
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("No category chosen.", theme::warning())),
            Line::from(Span::styled("Press [ or ] to pick one.", theme::muted())),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(GRID_ROWS),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    app.map_area.set(chunks[0]);
    render_tiles(f, chunks[0], fig, app);
    render_cursor_info(f, chunks[1], fig, app);
    render_colorbar(f, chunks[2], fig);
}

/// Tile size in cells for a grid drawn into `area`.
pub fn tile_size(area: Rect) -> (u16, u16) {
    ((area.width / GRID_COLS).max(1), (area.height / GRID_ROWS).max(1))
}

/// Grid cell under a terminal position, if the position is on the grid.
pub fn tile_at(area: Rect, x: u16, y: u16) -> Option<(u16, u16)> {
    if !area.contains(Position { x, y }) {
        return None;
    }
    let (tw, th) = tile_size(area);
    let col = (x - area.x) / tw;
    let row = (y - area.y) / th;
    (col < GRID_COLS && row < GRID_ROWS).then_some((col, row))
}

fn render_tiles(f: &mut Frame, area: Rect, fig: &ChoroplethFigure, app: &AppState) {
    let theme = Theme::default();
    let (tw, th) = tile_size(area);
    let show_cursor = app.focus == Focus::Map;

    for &(code, col, row) in tile_grid::TILES {
        let rect = Rect::new(area.x + col * tw, area.y + row * th, tw, th).intersection(area);
        if rect.width == 0 || rect.height == 0 {
            continue;
        }

        let mut style = match fig.region(code) {
            Some(region) => {
                let fg = if region.emphasized {
                    theme.region_border(true)
                } else {
                    theme::contrast_fg(region.fill)
                };
                let style = Style::default().bg(theme::to_color(region.fill)).fg(fg);
                if region.emphasized {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                }
            }
            None => Style::default().bg(theme.background).fg(theme.muted),
        };
        if show_cursor && code == app.map_cursor {
            style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
        }

        let label = match fig.region(code) {
            Some(r) if r.emphasized && tw >= 4 => format!("[{code}]"),
            _ => code.to_string(),
        };
        // vertically center the code inside taller tiles
        let mut lines = vec![Line::from(""); usize::from(rect.height.saturating_sub(1) / 2)];
        lines.push(Line::from(label));
        let para = Paragraph::new(lines).style(style).alignment(Alignment::Center);
        f.render_widget(para, rect);
    }
}

fn render_cursor_info(f: &mut Frame, area: Rect, fig: &ChoroplethFigure, app: &AppState) {
    let code = app.map_cursor;
    let line = match fig.region(code) {
        Some(region) => {
            let mut spans = vec![
                Span::styled(format!(" {} ", region.code), theme::accent_bold()),
                Span::styled(region.state.clone(), theme::text()),
                Span::styled(format!("  {}: ", fig.category), theme::muted()),
                Span::styled(format_value(region.value), theme::text()),
            ];
            if region.emphasized {
                spans.push(Span::styled("  selected", theme::selection()));
            }
            Line::from(spans)
        }
        None => Line::from(vec![
            Span::styled(format!(" {code} "), theme::accent_bold()),
            Span::styled("no data", theme::muted()),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_colorbar(f: &mut Frame, area: Rect, fig: &ChoroplethFigure) {
    let min_label = format!(" {} ", format_value(fig.min));
    let max_label = format!(" {} ", format_value(fig.max));
    let labels = (min_label.len() + max_label.len()) as u16;
    let width = area.width.saturating_sub(labels).max(1) as usize;

    let mut spans = vec![Span::styled(min_label, theme::muted())];
    for color in ColorScale::blues().sample(width) {
        spans.push(Span::styled(" ", Style::default().bg(theme::to_color(color))));
    }
    spans.push(Span::styled(max_label, theme::muted()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_size_scales_with_area() {
        assert_eq!(tile_size(Rect::new(0, 0, 60, 16)), (5, 2));
        assert_eq!(tile_size(Rect::new(0, 0, 5, 3)), (1, 1));
    }

    #[test]
    fn tile_at_respects_offset_and_bounds() {
        let area = Rect::new(10, 5, 48, 16);
        assert_eq!(tile_at(area, 10, 5), Some((0, 0)));
        assert_eq!(tile_at(area, 14, 7), Some((1, 1)));
        assert_eq!(tile_at(area, 57, 20), Some((11, 7)));
        assert_eq!(tile_at(area, 9, 5), None);
        assert_eq!(tile_at(area, 10, 21), None);
        assert_eq!(tile_at(Rect::default(), 0, 0), None);
    }

    #[test]
    fn tile_at_ignores_points_past_a_small_area() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(tile_at(area, 9, 4), Some((9, 4)));
        assert_eq!(tile_at(area, 10, 0), None);
        assert_eq!(tile_at(area, 11, 0), None);
        assert_eq!(tile_at(area, 0, 5), None);
        assert_eq!(tile_at(area, 0, 6), None);
    }
}
