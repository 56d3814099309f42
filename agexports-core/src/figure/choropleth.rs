//! Choropleth derivation: one region per row, colored by the chosen category.

use serde::Serialize;

use crate::color::{ColorScale, Rgb};
use crate::context::DashboardContext;
use crate::session::SelectionState;

/// Border drawn around a map region or pie sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub width: f64,
    pub color: Rgb,
}

/// Border for regions in the selection.
pub const SELECTED_BORDER: Border = Border {
    width: 3.0,
    color: Rgb::ORANGE,
};

/// Border for every other region.
pub const DEFAULT_BORDER: Border = Border {
    width: 1.0,
    color: Rgb::DARK_GRAY,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub code: String,
    pub state: String,
    pub value: f64,
    /// Position of `value` on the color axis, in `[0, 1]`.
    pub intensity: f64,
    pub fill: Rgb,
    pub emphasized: bool,
    pub border: Border,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethFigure {
    pub category: String,
    pub title: String,
    pub color_scale: String,
    pub min: f64,
    pub max: f64,
    pub regions: Vec<Region>,
}

impl ChoroplethFigure {
    pub fn region(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }
}

/// Position of `value` on a `[min, max]` axis. A flat axis maps to the midpoint.
pub fn intensity(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= f64::EPSILON {
        0.5
    } else {
        ((value - min) / span).clamp(0.0, 1.0)
    }
}

/// Build the map for `category`. No category, or one the table lacks, means no map.
pub fn derive_choropleth(
    ctx: &DashboardContext,
    category: Option<&str>,
    selection: &SelectionState,
) -> Option<ChoroplethFigure> {
    let category = category?;
    let (min, max) = ctx.table().range(category)?;
    let scale = ColorScale::blues();

    let regions = ctx
        .table()
        .rows()
        .iter()
        .map(|row| {
            let value = row.value(category).unwrap_or(0.0);
            let t = intensity(value, min, max);
            let emphasized = selection.contains(&row.code);
            Region {
                code: row.code.clone(),
                state: row.state.clone(),
                value,
                intensity: t,
                fill: scale.at(t),
                emphasized,
                border: if emphasized { SELECTED_BORDER } else { DEFAULT_BORDER },
            }
        })
        .collect();

    Some(ChoroplethFigure {
        category: category.to_string(),
        title: format!("Exports across country: {category}"),
        color_scale: scale.name().to_string(),
        min,
        max,
        regions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
code,state,total exports,corn
CA,California,100,5
TX,Texas,50,5
AK,Alaska,0,5
";

    #[test]
    fn selected_regions_get_heavy_orange_border() {
        let ctx = DashboardContext::from_csv_str(CSV).unwrap();
        let sel = SelectionState::new().toggled("TX");
        let fig = derive_choropleth(&ctx, Some("total exports"), &sel).unwrap();

        assert_eq!(fig.title, "Exports across country: total exports");
        assert_eq!(fig.regions.len(), 3);
        let tx = fig.region("TX").unwrap();
        assert!(tx.emphasized);
        assert_eq!(tx.border, SELECTED_BORDER);
        let ca = fig.region("CA").unwrap();
        assert!(!ca.emphasized);
        assert_eq!(ca.border, DEFAULT_BORDER);
    }

    #[test]
    fn intensity_spans_min_to_max() {
        let ctx = DashboardContext::from_csv_str(CSV).unwrap();
        let fig = derive_choropleth(&ctx, Some("total exports"), &SelectionState::new()).unwrap();
        assert_eq!(fig.region("AK").unwrap().intensity, 0.0);
        assert_eq!(fig.region("TX").unwrap().intensity, 0.5);
        assert_eq!(fig.region("CA").unwrap().intensity, 1.0);
        assert_eq!((fig.min, fig.max), (0.0, 100.0));
    }

    #[test]
    fn flat_category_maps_to_midpoint() {
        let ctx = DashboardContext::from_csv_str(CSV).unwrap();
        let fig = derive_choropleth(&ctx, Some("corn"), &SelectionState::new()).unwrap();
        assert!(fig.regions.iter().all(|r| r.intensity == 0.5));
    }

    #[test]
    fn no_category_no_map() {
        let ctx = DashboardContext::from_csv_str(CSV).unwrap();
        assert!(derive_choropleth(&ctx, None, &SelectionState::new()).is_none());
        assert!(derive_choropleth(&ctx, Some("kale"), &SelectionState::new()).is_none());
    }

    #[test]
    fn derivation_is_repeatable() {
        let ctx = DashboardContext::from_csv_str(CSV).unwrap();
        let sel = SelectionState::new().toggled("CA");
        assert_eq!(
            derive_choropleth(&ctx, Some("corn"), &sel),
            derive_choropleth(&ctx, Some("corn"), &sel)
        );
    }
}
