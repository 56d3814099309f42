//! Hover tracking for breakdown panels.
//!
//! Each rendered panel owns one hover slot. When several slots are non-empty
//! only the first in panel order counts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::selection::SelectionState;

/// A hover (category set) or unhover (category `None`) on one panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverEvent {
    pub panel_code: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl HoverEvent {
    pub fn hover(panel_code: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            panel_code: panel_code.into(),
            category: Some(category.into()),
        }
    }

    pub fn unhover(panel_code: impl Into<String>) -> Self {
        Self {
            panel_code: panel_code.into(),
            category: None,
        }
    }
}

/// Active hovers keyed by panel code. Empty slots are not stored.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    active: HashMap<String, String>,
}

impl HoverState {
    /// Apply an event. Events for panels that are not rendered are ignored.
    pub fn record(&mut self, event: HoverEvent, selection: &SelectionState) -> bool {
        if !selection.contains(&event.panel_code) {
            tracing::debug!(panel = %event.panel_code, "hover on a panel that is not rendered, ignored");
            return false;
        }
        match event.category {
            Some(category) => {
                let prev = self.active.insert(event.panel_code, category.clone());
                prev.as_deref() != Some(category.as_str())
            }
            None => self.active.remove(&event.panel_code).is_some(),
        }
    }

    /// Drop slots whose panel is gone.
    pub fn retain_panels(&mut self, selection: &SelectionState) {
        self.active.retain(|code, _| selection.contains(code));
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// One event per rendered panel, in panel order, empty where nothing is hovered.
    pub fn panel_events(&self, selection: &SelectionState) -> Vec<HoverEvent> {
        selection
            .iter()
            .map(|code| HoverEvent {
                panel_code: code.to_string(),
                category: self.active.get(code).cloned(),
            })
            .collect()
    }
}

/// Category of the first non-empty hover whose panel is still rendered.
pub fn first_hovered<'a>(events: &'a [HoverEvent], selection: &SelectionState) -> Option<&'a str> {
    events
        .iter()
        .find(|e| e.category.is_some() && selection.contains(&e.panel_code))
        .and_then(|e| e.category.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(codes: &[&str]) -> SelectionState {
        codes.iter().fold(SelectionState::new(), |s, c| s.toggled(c))
    }

    #[test]
    fn first_non_empty_wins() {
        let sel = selection(&["CA", "TX", "IA"]);
        let events = vec![
            HoverEvent::unhover("CA"),
            HoverEvent::hover("TX", "corn"),
            HoverEvent::hover("IA", "pork"),
        ];
        assert_eq!(first_hovered(&events, &sel), Some("corn"));
    }

    #[test]
    fn removed_panels_are_skipped() {
        let sel = selection(&["IA"]);
        let events = vec![HoverEvent::hover("TX", "corn"), HoverEvent::hover("IA", "pork")];
        assert_eq!(first_hovered(&events, &sel), Some("pork"));
        assert_eq!(first_hovered(&[], &sel), None);
    }

    #[test]
    fn panel_events_follow_selection_order() {
        let sel = selection(&["CA", "TX"]);
        let mut hover = HoverState::default();
        assert!(hover.record(HoverEvent::hover("TX", "corn"), &sel));
        assert!(!hover.record(HoverEvent::hover("TX", "corn"), &sel));
        assert!(!hover.record(HoverEvent::hover("NY", "corn"), &sel));

        let events = hover.panel_events(&sel);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], HoverEvent::unhover("CA"));
        assert_eq!(events[1], HoverEvent::hover("TX", "corn"));

        assert!(hover.record(HoverEvent::unhover("TX"), &sel));
        assert!(hover.is_empty());
    }

    #[test]
    fn retain_drops_departed_panels() {
        let sel = selection(&["CA", "TX"]);
        let mut hover = HoverState::default();
        hover.record(HoverEvent::hover("CA", "beef"), &sel);
        hover.record(HoverEvent::hover("TX", "corn"), &sel);

        let sel = sel.toggled("CA");
        hover.retain_panels(&sel);
        let events = hover.panel_events(&sel);
        assert_eq!(events, vec![HoverEvent::hover("TX", "corn")]);
    }
}
