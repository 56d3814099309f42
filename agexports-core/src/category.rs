//! Category registry: fixed display order and stable colors.
//!
//! `total exports` always comes first, everything else is alphabetical. Colors
//! are sampled once from the Set3 palette across the whole ordered list, so a
//! category keeps the same color in every breakdown chart.

use serde::Serialize;

use crate::color::{ColorScale, Rgb};
use crate::data::TOTAL_EXPORTS;

/// Suffix marking per-group aggregate columns (`veggies total`, `fruits total`).
pub const AGGREGATE_SUFFIX: &str = " total";

/// Aggregates are sums of other categories and never appear in breakdowns.
pub fn is_aggregate(name: &str) -> bool {
    name == TOTAL_EXPORTS || name.ends_with(AGGREGATE_SUFFIX)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub color: Rgb,
    pub aggregate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Build the registry from table columns using the default palette.
    pub fn from_columns(columns: &[String]) -> Self {
        Self::with_palette(columns, &ColorScale::set3())
    }

    pub fn with_palette(columns: &[String], palette: &ColorScale) -> Self {
        let mut rest: Vec<&String> = columns.iter().filter(|c| *c != TOTAL_EXPORTS).collect();
        rest.sort();
        rest.dedup();

        let mut ordered: Vec<&str> = Vec::with_capacity(columns.len());
        if columns.iter().any(|c| c == TOTAL_EXPORTS) {
            ordered.push(TOTAL_EXPORTS);
        }
        ordered.extend(rest.into_iter().map(String::as_str));

        let colors = palette.sample(ordered.len());
        let categories = ordered
            .into_iter()
            .zip(colors)
            .map(|(name, color)| Category {
                name: name.to_string(),
                color,
                aggregate: is_aggregate(name),
            })
            .collect();

        Self { categories }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn color(&self, name: &str) -> Option<Rgb> {
        self.get(name).map(|c| c.color)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Non-aggregate categories in display order.
    pub fn breakdown_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| !c.aggregate)
    }

    /// The category chosen when a session starts.
    pub fn default_category(&self) -> Option<&str> {
        self.categories.first().map(|c| c.name.as_str())
    }

    /// Category `offset` steps away from `name`, wrapping around.
    pub fn cycle(&self, name: Option<&str>, offset: isize) -> Option<&str> {
        let n = self.categories.len() as isize;
        if n == 0 {
            return None;
        }
        let start = match name.and_then(|n| self.position(n)) {
            Some(p) => p as isize,
            None if offset >= 0 => -1,
            None => 0,
        };
        let idx = (start + offset).rem_euclid(n) as usize;
        Some(self.categories[idx].name.as_str())
    }
}
