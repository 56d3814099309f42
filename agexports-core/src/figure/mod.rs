//! Figure derivation: pure functions of (context, session facets).

pub mod breakdown;
pub mod choropleth;
pub mod plotly;

pub use breakdown::{composition, derive_breakdown, derive_panel, highlight_set, BreakdownPanel, Sector};
pub use choropleth::{derive_choropleth, Border, ChoroplethFigure, Region, DEFAULT_BORDER, SELECTED_BORDER};

use serde::Serialize;

/// Everything one render needs: the map (if a category is chosen) and the panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub choropleth: Option<ChoroplethFigure>,
    pub panels: Vec<BreakdownPanel>,
}
