//! Read-only dashboard context shared by every session.

use std::sync::Arc;

use crate::category::CategoryRegistry;
use crate::config::DashboardConfig;
use crate::data::{load_dataset, DataError, DatasetTable, LoadOptions, LoadedDataset};

/// Dataset table plus category registry. Built once, never mutated, and
/// passed explicitly into every derivation.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    table: DatasetTable,
    registry: CategoryRegistry,
}

impl DashboardContext {
    pub fn new(table: DatasetTable) -> Self {
        let registry = CategoryRegistry::from_columns(table.columns());
        Self { table, registry }
    }

    pub fn from_csv_str(text: &str) -> Result<Self, DataError> {
        Ok(Self::new(DatasetTable::from_csv_str(text)?))
    }

    pub fn table(&self) -> &DatasetTable {
        &self.table
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Resolve source and cache from config and load the dataset.
pub fn open_dataset(config: &DashboardConfig, force: bool) -> Result<LoadedDataset, DataError> {
    let source = config.dataset_source()?;
    let cache = config.cache();
    let opts = LoadOptions {
        force,
        offline: config.offline,
        max_age: config.max_age(),
    };
    load_dataset(source.as_ref(), Some(&cache), opts)
}
