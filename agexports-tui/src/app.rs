//! Application state: single-owner, main-thread only.
//!
//! The shared [`DashboardContext`] is immutable; every interaction goes
//! through [`AppState::dispatch`], which feeds the session controller and
//! re-derives only the views it reports as stale.

use std::cell::Cell;
use std::sync::Arc;

use ratatui::layout::Rect;

use agexports_core::{
    ClickEvent, DashboardContext, DashboardEvent, DashboardView, HoverEvent, Rerender, Session,
};

use crate::tile_grid::{self, Direction};

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Map,
    Breakdown,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Categories => "Categories",
            Focus::Map => "Map",
            Focus::Breakdown => "Breakdown",
        }
    }

    pub fn next(self) -> Focus {
        match self {
            Focus::Categories => Focus::Map,
            Focus::Map => Focus::Breakdown,
            Focus::Breakdown => Focus::Categories,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Categories => Focus::Breakdown,
            Focus::Map => Focus::Categories,
            Focus::Breakdown => Focus::Map,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Active overlay (modal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
}

/// Cursor over the breakdown panels: which panel, which sector inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakdownCursor {
    pub panel: usize,
    pub sector: usize,
}

pub struct AppState {
    pub ctx: Arc<DashboardContext>,
    pub session: Session,
    /// Last derived figures. Refreshed per [`Rerender`] flags.
    pub view: DashboardView,

    pub focus: Focus,
    pub map_cursor: &'static str,
    pub breakdown_cursor: BreakdownCursor,
    /// Panel the keyboard cursor currently hovers, if any.
    hovered_panel: Option<String>,

    pub running: bool,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    /// Where the dataset came from, shown in the status bar.
    pub source_label: String,

    /// Inner area of the map pane at the last draw, for mouse hit-testing.
    pub map_area: Cell<Rect>,
}

impl AppState {
    pub fn new(ctx: Arc<DashboardContext>, session: Session, source_label: impl Into<String>) -> Self {
        let view = session.view(&ctx);
        Self {
            ctx,
            session,
            view,
            focus: Focus::Map,
            map_cursor: "KS",
            breakdown_cursor: BreakdownCursor::default(),
            hovered_panel: None,
            running: true,
            overlay: Overlay::Welcome,
            status_message: None,
            source_label: source_label.into(),
            map_area: Cell::new(Rect::default()),
        }
    }

    /// Feed one event through the session and refresh the stale views.
    pub fn dispatch(&mut self, event: DashboardEvent) -> Rerender {
        let rerender = self.session.handle(&self.ctx, event);
        if rerender.map {
            self.view.choropleth = self.session.choropleth(&self.ctx);
        }
        if rerender.breakdown {
            self.view.panels = self.session.breakdown(&self.ctx);
            self.clamp_breakdown_cursor();
        }
        tracing::trace!(?rerender, "dispatched");
        rerender
    }

    // ── Category ─────────────────────────────────────────────────────

    /// Step the chosen category forward or back through the registry.
    pub fn cycle_category(&mut self, offset: isize) {
        let next = self
            .ctx
            .registry()
            .cycle(self.session.category(), offset)
            .map(String::from);
        if let Some(name) = &next {
            self.set_status(format!("Category: {name}"));
        }
        self.dispatch(DashboardEvent::CategoryChanged { category: next });
    }

    // ── Map ──────────────────────────────────────────────────────────

    pub fn move_map_cursor(&mut self, dir: Direction) {
        if let Some(code) = tile_grid::neighbor(self.map_cursor, dir) {
            self.map_cursor = code;
        }
    }

    /// Toggle the state under the cursor.
    pub fn toggle_at_cursor(&mut self) {
        self.click(Some(self.map_cursor));
    }

    /// Route a map click. `None` is a click that hit no tile.
    pub fn click(&mut self, code: Option<&str>) {
        let event = match code {
            Some(code) => ClickEvent::on(code),
            None => ClickEvent::nowhere(),
        };
        let rerender = self.dispatch(DashboardEvent::MapClicked(event));
        match code {
            Some(code) if rerender.any() => {
                if self.session.selection().contains(code) {
                    self.set_status(format!("Selected {code}"));
                } else {
                    self.set_status(format!("Deselected {code}"));
                }
            }
            Some(code) => self.set_warning(format!("No export data for {code}")),
            None => {}
        }
    }

    pub fn clear_selection(&mut self) {
        if self.dispatch(DashboardEvent::SelectionCleared).any() {
            self.hovered_panel = None;
            self.set_status("Selection cleared");
        }
    }

    // ── Breakdown ────────────────────────────────────────────────────

    pub fn move_panel(&mut self, offset: isize) {
        let len = self.view.panels.len();
        if len == 0 {
            return;
        }
        let panel = (self.breakdown_cursor.panel as isize + offset).rem_euclid(len as isize) as usize;
        self.breakdown_cursor = BreakdownCursor { panel, sector: 0 };
        self.sync_hover();
    }

    pub fn move_sector(&mut self, offset: isize) {
        let Some(panel) = self.view.panels.get(self.breakdown_cursor.panel) else {
            return;
        };
        let len = panel.sectors.len();
        if len == 0 {
            return;
        }
        self.breakdown_cursor.sector =
            (self.breakdown_cursor.sector as isize + offset).rem_euclid(len as isize) as usize;
        self.sync_hover();
    }

    /// Category under the breakdown cursor, if the cursor sits on a sector.
    pub fn cursor_sector(&self) -> Option<(&str, &str)> {
        let panel = self.view.panels.get(self.breakdown_cursor.panel)?;
        let sector = panel.sectors.get(self.breakdown_cursor.sector)?;
        Some((panel.code.as_str(), sector.category.as_str()))
    }

    /// Emit hover events so the session matches the breakdown cursor.
    /// Only the focused breakdown pane hovers; one panel at a time.
    pub fn sync_hover(&mut self) {
        let target = if self.focus == Focus::Breakdown {
            self.cursor_sector()
                .map(|(code, category)| (code.to_string(), category.to_string()))
        } else {
            None
        };

        if let Some(previous) = self.hovered_panel.take() {
            let moved_away = target.as_ref().map_or(true, |(code, _)| *code != previous);
            if moved_away {
                self.dispatch(DashboardEvent::PieHovered(HoverEvent::unhover(previous)));
            }
        }
        if let Some((code, category)) = target {
            self.dispatch(DashboardEvent::PieHovered(HoverEvent::hover(code.clone(), category)));
            self.hovered_panel = Some(code);
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.sync_hover();
        }
    }

    fn clamp_breakdown_cursor(&mut self) {
        let panels = &self.view.panels;
        if panels.is_empty() {
            self.breakdown_cursor = BreakdownCursor::default();
            return;
        }
        let cursor = &mut self.breakdown_cursor;
        cursor.panel = cursor.panel.min(panels.len() - 1);
        let sectors = panels[cursor.panel].sectors.len();
        cursor.sector = cursor.sector.min(sectors.saturating_sub(1));
        if self
            .hovered_panel
            .as_ref()
            .is_some_and(|code| !self.session.selection().contains(code))
        {
            self.hovered_panel = None;
        }
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!("{msg}");
        self.status_message = Some((msg, StatusLevel::Warning));
    }
}
