//! Breakdown pane: one donut plus legend per selected state.

use std::f64::consts::{FRAC_PI_2, TAU};

use agexports_core::figure::breakdown::HOLE;
use agexports_core::figure::BreakdownPanel;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme::{self, Theme};
use crate::ui::format_value;

/// Panels per row once the pane is at least this wide.
const TWO_COLUMN_WIDTH: u16 = 70;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Breakdown;
    let panels = &app.view.panels;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" Breakdown ({} selected) ", panels.len()))
        .title_style(theme::panel_title(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if panels.is_empty() {
        render_empty(f, inner);
        return;
    }

    let columns = if inner.width >= TWO_COLUMN_WIDTH { 2 } else { 1 };
    let rows = panels.len().div_ceil(columns);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(inner);

    for (row_idx, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for (col_idx, cell) in cells.iter().enumerate() {
            let idx = row_idx * columns + col_idx;
            if let Some(panel) = panels.get(idx) {
                let cursor = (focused && app.breakdown_cursor.panel == idx)
                    .then_some(app.breakdown_cursor.sector);
                render_panel(f, *cell, panel, cursor);
            }
        }
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Click a state on the map to compare its exports.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Map: arrows move, Enter/Space toggles. Mouse clicks work too.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Draw one panel. `cursor` is the sector index under the keyboard cursor
/// when this panel has it.
fn render_panel(f: &mut Frame, area: Rect, panel: &BreakdownPanel, cursor: Option<usize>) {
    let active = cursor.is_some();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(format!(" {} ", panel.title))
        .title_style(theme::panel_title(active));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if panel.sectors.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No non-zero exports.", theme::muted())),
            inner,
        );
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    render_donut(f, halves[0], panel);
    render_legend(f, halves[1], panel, cursor);
}

/// Start and end angle (radians) per sector. The first sector starts at
/// 12 o'clock and sectors run counterclockwise.
pub fn sector_arcs(panel: &BreakdownPanel) -> Vec<(f64, f64)> {
    let mut start = FRAC_PI_2;
    panel
        .sectors
        .iter()
        .map(|s| {
            let end = start + s.share * TAU;
            let arc = (start, end);
            start = end;
            arc
        })
        .collect()
}

fn polar(r: f64, angle: f64) -> (f64, f64) {
    (r * angle.cos(), r * angle.sin())
}

fn render_donut(f: &mut Frame, area: Rect, panel: &BreakdownPanel) {
    let arcs = sector_arcs(panel);
    let highlight = Theme::default().highlight;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.05, 1.05])
        .y_bounds([-1.05, 1.05])
        .paint(|ctx| {
            for (sector, &(start, end)) in panel.sectors.iter().zip(&arcs) {
                let mut coords = Vec::new();
                let steps = ((end - start) / TAU * 180.0).ceil().max(1.0) as usize;
                for ring in 0..=10 {
                    let r = HOLE + (1.0 - HOLE) * f64::from(ring) / 10.0;
                    for step in 0..=steps {
                        let angle = start + (end - start) * step as f64 / steps as f64;
                        coords.push(polar(r, angle));
                    }
                }
                ctx.draw(&Points {
                    coords: &coords,
                    color: theme::to_color(sector.color),
                });

                if sector.highlighted {
                    for angle in [start, end] {
                        let (x1, y1) = polar(HOLE, angle);
                        let (x2, y2) = polar(1.0, angle);
                        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, highlight));
                    }
                    let rim: Vec<(f64, f64)> = (0..=steps)
                        .flat_map(|step| {
                            let angle = start + (end - start) * step as f64 / steps as f64;
                            [polar(1.0, angle), polar(HOLE, angle)]
                        })
                        .collect();
                    ctx.draw(&Points {
                        coords: &rim,
                        color: highlight,
                    });
                }
            }
        });
    f.render_widget(canvas, area);
}

fn render_legend(f: &mut Frame, area: Rect, panel: &BreakdownPanel, cursor: Option<usize>) {
    let mut lines: Vec<Line> = panel
        .sectors
        .iter()
        .enumerate()
        .map(|(idx, sector)| {
            let mut label_style = if sector.highlighted {
                theme::text().add_modifier(Modifier::BOLD)
            } else {
                theme::muted()
            };
            if cursor == Some(idx) {
                label_style = label_style.add_modifier(Modifier::REVERSED);
            }
            let marker = if sector.highlighted { "▶" } else { " " };
            Line::from(vec![
                Span::styled(marker, theme::text()),
                Span::styled("██ ", Style::default().fg(theme::to_color(sector.color))),
                Span::styled(sector.category.clone(), label_style),
                Span::styled(format!(" {:.1}%", sector.share * 100.0), theme::text()),
            ])
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled("   total ", theme::muted()),
        Span::styled(format_value(panel.total), theme::accent()),
    ]));
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use agexports_core::DashboardContext;

    const CSV: &str = "\
code,state,category,total exports,corn,beef,wheat
CA,California,state,100,25,50,25
";

    #[test]
    fn arcs_cover_full_circle_from_top() {
        let ctx = DashboardContext::from_csv_str(CSV).unwrap();
        let panel = agexports_core::figure::derive_panel(&ctx, "CA", &[]).unwrap();
        let arcs = sector_arcs(&panel);
        assert_eq!(arcs.len(), 3);
        assert!((arcs[0].0 - FRAC_PI_2).abs() < 1e-12);
        // beef is half the pie
        assert!((arcs[0].1 - arcs[0].0 - std::f64::consts::PI).abs() < 1e-9);
        for pair in arcs.windows(2) {
            assert!((pair[0].1 - pair[1].0).abs() < 1e-12);
        }
        assert!((arcs[2].1 - (FRAC_PI_2 + TAU)).abs() < 1e-9);
    }
}
