//! Dataset sources, caching, parsing and quality checks

pub mod cache;
pub mod loader;
pub mod quality;
pub mod source;
pub mod table;

pub use cache::{CacheMeta, CacheStatus, DatasetCache};
pub use loader::{load_dataset, DatasetOrigin, LoadOptions, LoadedDataset};
pub use quality::{consistency_report, ConsistencyEntry};
pub use source::{DataError, DatasetSource, FileSource, HttpSource, StaticSource, DEFAULT_SOURCE_URL};
pub use table::{normalize_column, DatasetTable, Row, CODE_COLUMN, STATE_COLUMN, TOTAL_EXPORTS};
