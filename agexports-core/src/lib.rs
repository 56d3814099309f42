//! AgExports Core: dataset, categories, session state machine, figure derivation.
//!
//! This crate contains everything the dashboard frontends share:
//! - Dataset loading (HTTP or file), on-disk caching and validation
//! - Category registry with stable per-category colors
//! - Per-session selection and hover state, driven by structured events
//! - Pure derivation of the choropleth and per-state breakdown figures
//! - Plotly-compatible JSON export of derived figures

pub mod category;
pub mod color;
pub mod config;
pub mod context;
pub mod data;
pub mod figure;
pub mod session;

pub use category::{Category, CategoryRegistry};
pub use config::{ConfigError, DashboardConfig};
pub use context::{open_dataset, DashboardContext};
pub use data::{DataError, DatasetTable};
pub use figure::DashboardView;
pub use session::{ClickEvent, DashboardEvent, HoverEvent, Rerender, SelectionState, Session};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the shared context can be read from many sessions
    /// at once, and sessions can move between threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<DashboardContext>();
        require_sync::<DashboardContext>();
        require_send::<std::sync::Arc<DashboardContext>>();
        require_sync::<CategoryRegistry>();
        require_sync::<DatasetTable>();

        require_send::<Session>();
        require_send::<DashboardEvent>();
        require_send::<DashboardView>();
        require_send::<DataError>();
        require_sync::<DataError>();
    }
}
