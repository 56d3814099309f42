//! Immutable in-memory dataset: one row per state, one value per category.
//!
//! Column normalization happens once at load time:
//! - the constant `category` column is dropped
//! - `total <x>` columns (other than `total exports`) become `<x> total`
//!   so aggregates sort next to their components

use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use super::source::DataError;

pub const CODE_COLUMN: &str = "code";
pub const STATE_COLUMN: &str = "state";
pub const DROPPED_COLUMN: &str = "category";
pub const TOTAL_EXPORTS: &str = "total exports";

/// One US state or territory.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub code: String,
    pub state: String,
    values: BTreeMap<String, f64>,
}

impl Row {
    /// Export value for a category, if the column exists.
    pub fn value(&self, category: &str) -> Option<f64> {
        self.values.get(category).copied()
    }
}

/// The loaded dataset. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct DatasetTable {
    columns: Vec<String>,
    rows: Vec<Row>,
    index: HashMap<String, usize>,
}

/// Map a raw header to its normalized category name. `None` means dropped.
pub fn normalize_column(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name == DROPPED_COLUMN {
        return None;
    }
    match name.strip_prefix("total ") {
        Some(rest) if name != TOTAL_EXPORTS && !rest.is_empty() => Some(format!("{rest} total")),
        _ => Some(name.to_string()),
    }
}

impl DatasetTable {
    /// Parse a CSV document. Any schema or value problem is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();

        // (csv position, normalized name) for every kept category column
        let mut code_idx = None;
        let mut state_idx = None;
        let mut category_cols: Vec<(usize, String)> = Vec::new();
        for (i, raw) in headers.iter().enumerate() {
            match normalize_column(raw) {
                Some(name) if name == CODE_COLUMN => code_idx = Some(i),
                Some(name) if name == STATE_COLUMN => state_idx = Some(i),
                Some(name) => category_cols.push((i, name)),
                None => {}
            }
        }

        let code_idx = code_idx.ok_or_else(|| DataError::MissingColumn(CODE_COLUMN.into()))?;
        let state_idx = state_idx.ok_or_else(|| DataError::MissingColumn(STATE_COLUMN.into()))?;
        if !category_cols.iter().any(|(_, name)| name == TOTAL_EXPORTS) {
            return Err(DataError::MissingColumn(TOTAL_EXPORTS.into()));
        }

        let mut rows = Vec::new();
        let mut index = HashMap::new();
        for (row_no, record) in rdr.records().enumerate() {
            let record = record?;
            let field = |i: usize| record.get(i).unwrap_or("");

            let code = field(code_idx).to_uppercase();
            if code.is_empty() {
                return Err(DataError::InvalidValue {
                    row: row_no + 1,
                    column: CODE_COLUMN.into(),
                    value: String::new(),
                });
            }

            let mut values = BTreeMap::new();
            for (i, name) in &category_cols {
                let raw = field(*i);
                let value = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .ok_or_else(|| DataError::InvalidValue {
                        row: row_no + 1,
                        column: name.clone(),
                        value: raw.to_string(),
                    })?;
                values.insert(name.clone(), value);
            }

            if index.insert(code.clone(), rows.len()).is_some() {
                return Err(DataError::DuplicateCode(code));
            }
            rows.push(Row {
                code,
                state: field(state_idx).to_string(),
                values,
            });
        }

        if rows.is_empty() {
            return Err(DataError::EmptyTable);
        }

        let columns = category_cols.into_iter().map(|(_, name)| name).collect();
        tracing::debug!(rows = rows.len(), "dataset table parsed");
        Ok(Self {
            columns,
            rows,
            index,
        })
    }

    pub fn from_csv_str(text: &str) -> Result<Self, DataError> {
        Self::from_reader(text.as_bytes())
    }

    /// Category column names in source order (after normalization).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, code: &str) -> Option<&Row> {
        self.index.get(code).map(|&i| &self.rows[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn has_column(&self, category: &str) -> bool {
        self.columns.iter().any(|c| c == category)
    }

    /// Minimum and maximum of a category across all rows.
    pub fn range(&self, category: &str) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.value(category))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
