//! AgExports TUI: category chips, tile-grid choropleth and per-state
//! breakdown donuts in the terminal.

pub mod app;
pub mod input;
pub mod theme;
pub mod tile_grid;
pub mod ui;
