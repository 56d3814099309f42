//! Per-user interaction state and the controller that mutates it.
//!
//! A session holds three orthogonal facets: the chosen category, the
//! selection and the active hovers. Views are never cached; they are derived
//! from the session and the shared context on demand.

pub mod event;
pub mod hover;
pub mod selection;

pub use event::{ClickEvent, DashboardEvent, Rerender};
pub use hover::{first_hovered, HoverEvent, HoverState};
pub use selection::{SelectionState, Toggled};

use crate::context::DashboardContext;
use crate::figure::{derive_breakdown, derive_choropleth, BreakdownPanel, ChoroplethFigure, DashboardView};

#[derive(Debug, Clone)]
pub struct Session {
    category: Option<String>,
    selection: SelectionState,
    hover: HoverState,
}

impl Session {
    /// Empty selection, no hover, the registry's default category.
    pub fn new(ctx: &DashboardContext) -> Self {
        Self {
            category: ctx.registry().default_category().map(String::from),
            selection: SelectionState::new(),
            hover: HoverState::default(),
        }
    }

    /// Like [`new`](Self::new) but starting on `category` when it exists.
    pub fn starting_with(ctx: &DashboardContext, category: &str) -> Self {
        let mut session = Self::new(ctx);
        if ctx.registry().contains(category) {
            session.category = Some(category.to_string());
        } else {
            tracing::warn!(category, "unknown start category, keeping default");
        }
        session
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Hover events in panel order, one per rendered panel.
    pub fn hover_events(&self) -> Vec<HoverEvent> {
        self.hover.panel_events(&self.selection)
    }

    pub fn handle(&mut self, ctx: &DashboardContext, event: DashboardEvent) -> Rerender {
        match event {
            DashboardEvent::CategoryChanged { category } => self.set_category(ctx, category.as_deref()),
            DashboardEvent::MapClicked(click) => self.click(ctx, click),
            DashboardEvent::PieHovered(hover) => self.hover(hover),
            DashboardEvent::SelectionCleared => self.clear_selection(),
        }
    }

    /// Change the chosen category. Unknown names leave no category chosen.
    pub fn set_category(&mut self, ctx: &DashboardContext, category: Option<&str>) -> Rerender {
        self.category = match category {
            Some(name) if ctx.registry().contains(name) => Some(name.to_string()),
            Some(name) => {
                tracing::debug!(category = name, "unknown category, map not rendered");
                None
            }
            None => None,
        };
        Rerender::BOTH
    }

    /// Toggle the clicked state. Clicks without a known code change nothing.
    pub fn click(&mut self, ctx: &DashboardContext, click: ClickEvent) -> Rerender {
        let Some(code) = click.code else {
            return Rerender::NONE;
        };
        if !ctx.table().contains(&code) {
            tracing::warn!(code = %code, "click on a code not in the dataset, ignored");
            return Rerender::NONE;
        }
        let toggled = self.selection.toggle(&code);
        if toggled == Toggled::Removed {
            self.hover.retain_panels(&self.selection);
        }
        tracing::debug!(code = %code, ?toggled, selected = self.selection.len(), "selection toggled");
        Rerender::BOTH
    }

    /// Hover never affects the map.
    pub fn hover(&mut self, event: HoverEvent) -> Rerender {
        if self.hover.record(event, &self.selection) {
            Rerender::BREAKDOWN
        } else {
            Rerender::NONE
        }
    }

    pub fn clear_selection(&mut self) -> Rerender {
        if self.selection.is_empty() {
            return Rerender::NONE;
        }
        self.selection.clear();
        self.hover.clear();
        Rerender::BOTH
    }

    pub fn choropleth(&self, ctx: &DashboardContext) -> Option<ChoroplethFigure> {
        derive_choropleth(ctx, self.category(), &self.selection)
    }

    pub fn breakdown(&self, ctx: &DashboardContext) -> Vec<BreakdownPanel> {
        derive_breakdown(ctx, &self.selection, self.category(), &self.hover_events())
    }

    pub fn view(&self, ctx: &DashboardContext) -> DashboardView {
        DashboardView {
            choropleth: self.choropleth(ctx),
            panels: self.breakdown(ctx),
        }
    }
}
