//! Data-quality sanity check: component sums versus `total exports`.
//!
//! The per-category columns do not cover every product, so a row's component
//! sum is normally below its total. A sum noticeably above the total points at
//! a bad row. This is reported, never enforced.

use serde::Serialize;

use super::table::{DatasetTable, TOTAL_EXPORTS};
use crate::category::CategoryRegistry;

/// Relative slack allowed above the total before a row is flagged.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyEntry {
    pub code: String,
    pub total: f64,
    pub component_sum: f64,
    /// component_sum / total, or 0 when total is 0.
    pub coverage: f64,
    pub consistent: bool,
}

pub fn consistency_report(
    table: &DatasetTable,
    registry: &CategoryRegistry,
    tolerance: f64,
) -> Vec<ConsistencyEntry> {
    table
        .rows()
        .iter()
        .map(|row| {
            let total = row.value(TOTAL_EXPORTS).unwrap_or(0.0);
            let component_sum: f64 = registry
                .breakdown_categories()
                .filter_map(|c| row.value(&c.name))
                .sum();
            let coverage = if total > 0.0 { component_sum / total } else { 0.0 };
            let consistent = if total > 0.0 {
                component_sum <= total * (1.0 + tolerance)
            } else {
                component_sum == 0.0
            };
            ConsistencyEntry {
                code: row.code.clone(),
                total,
                component_sum,
                coverage,
                consistent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_rows_whose_parts_exceed_total() {
        let table = DatasetTable::from_csv_str(
            "code,state,total exports,beef,corn,total veggies\n\
             AL,Alabama,100,40,50,70\n\
             AK,Alaska,10,8,5,0\n\
             ZZ,Nowhere,0,0,0,0\n",
        )
        .unwrap();
        let registry = CategoryRegistry::from_columns(table.columns());
        let report = consistency_report(&table, &registry, DEFAULT_TOLERANCE);

        let al = &report[0];
        assert_eq!(al.component_sum, 90.0);
        assert!(al.consistent);
        assert!((al.coverage - 0.9).abs() < 1e-12);

        let ak = &report[1];
        assert_eq!(ak.component_sum, 13.0);
        assert!(!ak.consistent);

        assert!(report[2].consistent);
        assert_eq!(report[2].coverage, 0.0);
    }
}
