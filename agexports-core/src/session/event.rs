//! Structured UI events consumed by a session.

use serde::{Deserialize, Serialize};

use super::hover::HoverEvent;

/// A click on the map. `code` is `None` when the click hit no region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(default)]
    pub code: Option<String>,
}

impl ClickEvent {
    pub fn on(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }

    pub fn nowhere() -> Self {
        Self { code: None }
    }
}

/// Everything the interaction controller reacts to.
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type":"map_clicked","code":"CA"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    CategoryChanged {
        #[serde(default)]
        category: Option<String>,
    },
    MapClicked(ClickEvent),
    PieHovered(HoverEvent),
    SelectionCleared,
}

/// Which views must be re-derived after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rerender {
    pub map: bool,
    pub breakdown: bool,
}

impl Rerender {
    pub const NONE: Rerender = Rerender {
        map: false,
        breakdown: false,
    };
    pub const BOTH: Rerender = Rerender {
        map: true,
        breakdown: true,
    };
    pub const BREAKDOWN: Rerender = Rerender {
        map: false,
        breakdown: true,
    };

    pub fn any(self) -> bool {
        self.map || self.breakdown
    }
}
