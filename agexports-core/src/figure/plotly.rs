//! Export derived figures as plotly figure JSON (`{"data": [...], "layout": {...}}`).

use serde_json::{json, Value};

use super::breakdown::{BreakdownPanel, HOLE};
use super::choropleth::ChoroplethFigure;
use super::DashboardView;
use crate::color::ColorScale;

/// Mode-bar buttons removed from the map, matching its click-to-select use.
const MAP_REMOVED_BUTTONS: [&str; 3] = ["pan2d", "select2d", "lasso2d"];

fn colorscale_json(scale: &ColorScale) -> Value {
    let stops = scale.stops();
    let last = stops.len().saturating_sub(1).max(1) as f64;
    Value::Array(
        stops
            .iter()
            .enumerate()
            .map(|(i, c)| json!([i as f64 / last, c.to_hex()]))
            .collect(),
    )
}

pub fn choropleth_json(fig: &ChoroplethFigure) -> Value {
    let locations: Vec<&str> = fig.regions.iter().map(|r| r.code.as_str()).collect();
    let z: Vec<f64> = fig.regions.iter().map(|r| r.value).collect();
    let names: Vec<&str> = fig.regions.iter().map(|r| r.state.as_str()).collect();
    let widths: Vec<f64> = fig.regions.iter().map(|r| r.border.width).collect();
    let colors: Vec<String> = fig.regions.iter().map(|r| r.border.color.to_hex()).collect();

    json!({
        "data": [{
            "type": "choropleth",
            "locationmode": "USA-states",
            "locations": locations,
            "z": z,
            "text": names,
            "zmin": fig.min,
            "zmax": fig.max,
            "colorscale": colorscale_json(&ColorScale::blues()),
            "showscale": false,
            "showlegend": false,
            "marker": {
                "line": { "width": widths, "color": colors }
            }
        }],
        "layout": {
            "title": { "text": fig.title },
            "geo": { "scope": "usa" }
        },
        "config": {
            "modeBarButtonsToRemove": MAP_REMOVED_BUTTONS,
            "displaylogo": false
        }
    })
}

pub fn breakdown_json(panel: &BreakdownPanel) -> Value {
    let labels: Vec<&str> = panel.sectors.iter().map(|s| s.category.as_str()).collect();
    let values: Vec<f64> = panel.sectors.iter().map(|s| s.value).collect();
    let colors: Vec<String> = panel.sectors.iter().map(|s| s.color.to_hex()).collect();
    let widths: Vec<f64> = panel.sectors.iter().map(|s| s.border_width).collect();
    // hover handlers read the category back from customdata[0]
    let customdata: Vec<[&str; 1]> = labels.iter().map(|l| [*l]).collect();

    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
            "customdata": customdata,
            "hole": HOLE,
            "sort": false,
            "textinfo": "label+percent",
            "marker": {
                "colors": colors,
                "line": { "width": widths }
            }
        }],
        "layout": {
            "title": { "text": panel.title },
            "showlegend": false
        },
        "config": { "displaylogo": false }
    })
}

pub fn view_json(view: &DashboardView) -> Value {
    json!({
        "choropleth": view.choropleth.as_ref().map(choropleth_json),
        "breakdown": view
            .panels
            .iter()
            .map(|p| json!({ "code": p.code, "figure": breakdown_json(p) }))
            .collect::<Vec<_>>(),
    })
}
