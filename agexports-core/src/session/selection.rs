//! Selection state: the ordered set of state codes chosen for comparison.

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Insertion-ordered set of state codes.
///
/// Order is observable: it is the left-to-right order of breakdown panels.
/// Removing a code leaves the relative order of the others unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    codes: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `code` if present, append it otherwise.
    pub fn toggle(&mut self, code: &str) -> Toggled {
        match self.codes.iter().position(|c| c == code) {
            Some(i) => {
                self.codes.remove(i);
                Toggled::Removed
            }
            None => {
                self.codes.push(code.to_string());
                Toggled::Added
            }
        }
    }

    /// By-value form of [`toggle`](Self::toggle).
    pub fn toggled(mut self, code: &str) -> Self {
        self.toggle(code);
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = SelectionState::new();
        assert_eq!(sel.toggle("CA"), Toggled::Added);
        assert!(sel.contains("CA"));
        assert_eq!(sel.toggle("CA"), Toggled::Removed);
        assert!(sel.is_empty());
    }

    #[test]
    fn removal_keeps_relative_order() {
        let sel = SelectionState::new()
            .toggled("CA")
            .toggled("TX")
            .toggled("IA")
            .toggled("TX");
        assert_eq!(sel.codes(), &["CA", "IA"]);
        let sel = sel.toggled("TX");
        assert_eq!(sel.codes(), &["CA", "IA", "TX"]);
        assert_eq!(sel.position("TX"), Some(2));
    }
}
