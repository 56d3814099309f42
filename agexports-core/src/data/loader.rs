//! Startup loader: cache lookup, fetch, validate, cache.
//!
//! Text is parsed before it is cached, so the cache never holds a dataset
//! that failed validation.

use chrono::Duration;

use super::cache::{CacheMeta, CacheStatus, DatasetCache};
use super::source::{DataError, DatasetSource};
use super::table::DatasetTable;

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Refetch even if the cache is fresh.
    pub force: bool,
    /// Never touch the network; serve whatever the cache holds.
    pub offline: bool,
    pub max_age: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            force: false,
            offline: false,
            max_age: Duration::hours(24 * 7),
        }
    }
}

/// How the table was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetOrigin {
    Cache(CacheMeta),
    Fetched(Option<CacheMeta>),
}

#[derive(Debug)]
pub struct LoadedDataset {
    pub table: DatasetTable,
    pub origin: DatasetOrigin,
}

pub fn load_dataset(
    source: &dyn DatasetSource,
    cache: Option<&DatasetCache>,
    opts: LoadOptions,
) -> Result<LoadedDataset, DataError> {
    let key = source.describe();
    let cache = cache.filter(|_| source.cacheable());

    if let Some(cache) = cache {
        let now = chrono::Local::now().naive_local();
        let status = cache.status(&key, opts.max_age, now);
        let usable = if opts.offline {
            status != CacheStatus::Missing
        } else {
            !opts.force && status == CacheStatus::Fresh
        };

        if usable {
            match cache.read().and_then(|(text, meta)| Ok((DatasetTable::from_csv_str(&text)?, meta))) {
                Ok((table, meta)) => {
                    tracing::info!(source = %meta.source, rows = table.len(), "dataset loaded from cache");
                    return Ok(LoadedDataset {
                        table,
                        origin: DatasetOrigin::Cache(meta),
                    });
                }
                Err(e) if opts.offline => return Err(e),
                Err(e) => tracing::warn!(error = %e, "discarding unusable cache"),
            }
        } else if opts.offline {
            return Err(DataError::NoCachedData(cache.cache_dir().to_path_buf()));
        } else {
            tracing::debug!(?status, "cache not usable, fetching");
        }
    } else if opts.offline && source.cacheable() {
        return Err(DataError::CacheError("offline mode requires a cache directory".into()));
    }

    let text = source.fetch()?;
    let table = DatasetTable::from_csv_str(&text)?;
    let meta = match cache {
        Some(cache) => Some(cache.write(&key, &text, table.len())?),
        None => None,
    };
    tracing::info!(source = %key, rows = table.len(), "dataset loaded");

    Ok(LoadedDataset {
        table,
        origin: DatasetOrigin::Fetched(meta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::StaticSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CSV: &str = "code,state,total exports,corn\nAL,Alabama,10,2\n";

    struct CountingSource {
        body: &'static str,
        calls: AtomicUsize,
    }

    impl DatasetSource for CountingSource {
        fn describe(&self) -> String {
            "counting".into()
        }
        fn fetch(&self) -> Result<String, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.to_string())
        }
    }

    #[test]
    fn second_load_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path());
        let source = CountingSource {
            body: CSV,
            calls: AtomicUsize::new(0),
        };

        let first = load_dataset(&source, Some(&cache), LoadOptions::default()).unwrap();
        assert!(matches!(first.origin, DatasetOrigin::Fetched(Some(_))));
        let second = load_dataset(&source, Some(&cache), LoadOptions::default()).unwrap();
        assert!(matches!(second.origin, DatasetOrigin::Cache(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let forced = LoadOptions {
            force: true,
            ..LoadOptions::default()
        };
        load_dataset(&source, Some(&cache), forced).unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalid_text_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path());
        let source = StaticSource::new("bad", "state,total exports\nAlabama,1\n");
        let err = load_dataset(&source, Some(&cache), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(_)));
        assert!(cache.meta().is_none());
    }

    #[test]
    fn offline_without_cache_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path());
        let source = StaticSource::new("s", CSV);
        let opts = LoadOptions {
            offline: true,
            ..LoadOptions::default()
        };
        assert!(matches!(
            load_dataset(&source, Some(&cache), opts),
            Err(DataError::NoCachedData(_))
        ));
    }

    #[test]
    fn offline_serves_stale_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path());
        let source = StaticSource::new("s", CSV);
        load_dataset(&source, Some(&cache), LoadOptions::default()).unwrap();

        let opts = LoadOptions {
            offline: true,
            max_age: Duration::zero(),
            ..LoadOptions::default()
        };
        let loaded = load_dataset(&source, Some(&cache), opts).unwrap();
        assert!(matches!(loaded.origin, DatasetOrigin::Cache(_)));
        assert_eq!(loaded.table.len(), 1);
    }

    #[test]
    fn corrupt_cache_is_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path());
        let source = StaticSource::new("s", CSV);
        load_dataset(&source, Some(&cache), LoadOptions::default()).unwrap();
        std::fs::write(cache.data_path(), "garbage").unwrap();

        let loaded = load_dataset(&source, Some(&cache), LoadOptions::default()).unwrap();
        assert!(matches!(loaded.origin, DatasetOrigin::Fetched(Some(_))));
        assert_eq!(cache.read().unwrap().0, CSV);
    }
}
