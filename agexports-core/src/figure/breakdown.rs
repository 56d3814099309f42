//! Breakdown derivation: one donut per selected state.
//!
//! Aggregate categories are dropped (they would double count), zero values
//! are dropped (no zero-angle sectors), and sectors whose category is chosen
//! or hovered get an emphasized border.

use serde::Serialize;

use crate::category::CategoryRegistry;
use crate::context::DashboardContext;
use crate::color::Rgb;
use crate::session::{first_hovered, HoverEvent, SelectionState};

/// Fraction of the radius left empty in the middle of each donut.
pub const HOLE: f64 = 0.5;

/// Border width of highlighted sectors; others have none.
pub const HIGHLIGHT_BORDER_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sector {
    pub category: String,
    pub value: f64,
    /// value / panel total
    pub share: f64,
    pub color: Rgb,
    pub highlighted: bool,
    pub border_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownPanel {
    pub code: String,
    pub state: String,
    pub title: String,
    pub total: f64,
    pub sectors: Vec<Sector>,
}

impl BreakdownPanel {
    pub fn sector(&self, category: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.category == category)
    }
}

/// Chosen category (if any) plus the first hovered category (if any).
pub fn highlight_set(
    category: Option<&str>,
    hover_events: &[HoverEvent],
    selection: &SelectionState,
) -> Vec<String> {
    let mut highlights: Vec<String> = category.map(String::from).into_iter().collect();
    if let Some(hovered) = first_hovered(hover_events, selection) {
        if !highlights.iter().any(|h| h == hovered) {
            highlights.push(hovered.to_string());
        }
    }
    highlights
}

/// (category, value) pairs for one row: non-aggregate, non-zero, registry order.
pub fn composition<'a>(
    ctx: &'a DashboardContext,
    code: &str,
) -> Option<Vec<(&'a str, f64)>> {
    let row = ctx.table().row(code)?;
    Some(
        ctx.registry()
            .breakdown_categories()
            .filter_map(|c| row.value(&c.name).map(|v| (c.name.as_str(), v)))
            .filter(|(_, v)| *v != 0.0)
            .collect(),
    )
}

pub fn derive_panel(
    ctx: &DashboardContext,
    code: &str,
    highlights: &[String],
) -> Option<BreakdownPanel> {
    let row = ctx.table().row(code)?;
    let parts = composition(ctx, code)?;
    let total: f64 = parts.iter().map(|(_, v)| v).sum();
    let registry: &CategoryRegistry = ctx.registry();

    let sectors = parts
        .into_iter()
        .map(|(category, value)| {
            let highlighted = highlights.iter().any(|h| h == category);
            Sector {
                category: category.to_string(),
                value,
                share: if total > 0.0 { value / total } else { 0.0 },
                color: registry.color(category).unwrap_or(Rgb::DARK_GRAY),
                highlighted,
                border_width: if highlighted { HIGHLIGHT_BORDER_WIDTH } else { 0.0 },
            }
        })
        .collect();

    Some(BreakdownPanel {
        code: row.code.clone(),
        state: row.state.clone(),
        title: format!("Exports breakdown for: {}", row.code),
        total,
        sectors,
    })
}

/// One panel per selected code, in selection order.
pub fn derive_breakdown(
    ctx: &DashboardContext,
    selection: &SelectionState,
    category: Option<&str>,
    hover_events: &[HoverEvent],
) -> Vec<BreakdownPanel> {
    if selection.is_empty() {
        return Vec::new();
    }
    let highlights = highlight_set(category, hover_events, selection);
    selection
        .iter()
        .filter_map(|code| derive_panel(ctx, code, &highlights))
        .collect()
}
