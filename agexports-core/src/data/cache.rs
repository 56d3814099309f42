//! On-disk cache for the downloaded dataset.
//!
//! Layout: `{cache_dir}/us_ag_exports.csv` plus a `meta.json` sidecar holding
//! the source, fetch time, row count and a blake3 hash of the CSV text.
//! Both files are written atomically (write to .tmp, rename into place).
//! A hash mismatch on read means the file is corrupt and must be refetched.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::source::DataError;

const DATA_FILE: &str = "us_ag_exports.csv";
const META_FILE: &str = "meta.json";

/// Metadata sidecar for the cached dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMeta {
    pub source: String,
    pub content_hash: String,
    pub row_count: usize,
    pub fetched_at: NaiveDateTime,
}

/// Freshness of the cache relative to a requested source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Missing,
    Fresh,
    Stale,
    /// Cached text came from a different source.
    OtherSource,
}

pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Write `contents` next to `path` as `<name>.tmp`, then rename into place.
fn write_atomic(path: &Path, contents: &str) -> Result<(), DataError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);
    fs::write(&tmp_path, contents)
        .map_err(|e| DataError::CacheError(format!("write {}: {e}", tmp_path.display())))?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::CacheError(format!("atomic rename of {} failed: {e}", path.display()))
    })
}

pub struct DatasetCache {
    cache_dir: PathBuf,
}

impl DatasetCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn data_path(&self) -> PathBuf {
        self.cache_dir.join(DATA_FILE)
    }

    fn meta_path(&self) -> PathBuf {
        self.cache_dir.join(META_FILE)
    }

    /// Store CSV text and its metadata.
    pub fn write(&self, source: &str, text: &str, row_count: usize) -> Result<CacheMeta, DataError> {
        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| DataError::CacheError(format!("failed to create dir: {e}")))?;

        write_atomic(&self.data_path(), text)?;

        let meta = CacheMeta {
            source: source.to_string(),
            content_hash: content_hash(text),
            row_count,
            fetched_at: chrono::Local::now().naive_local(),
        };
        let meta_json = serde_json::to_string_pretty(&meta)
            .map_err(|e| DataError::CacheError(format!("meta serialization: {e}")))?;
        write_atomic(&self.meta_path(), &meta_json)?;

        tracing::debug!(dir = %self.cache_dir.display(), row_count, "dataset cached");
        Ok(meta)
    }

    /// Metadata sidecar, if present and parseable.
    pub fn meta(&self) -> Option<CacheMeta> {
        let text = fs::read_to_string(self.meta_path()).ok()?;
        serde_json::from_str(&text).ok()
    }

    /// Read the cached CSV text, verifying it against the stored hash.
    pub fn read(&self) -> Result<(String, CacheMeta), DataError> {
        let meta = self
            .meta()
            .ok_or_else(|| DataError::NoCachedData(self.cache_dir.clone()))?;
        let text = fs::read_to_string(self.data_path())
            .map_err(|_| DataError::NoCachedData(self.cache_dir.clone()))?;
        if content_hash(&text) != meta.content_hash {
            return Err(DataError::CacheError(format!(
                "content hash mismatch in {}",
                self.data_path().display()
            )));
        }
        Ok((text, meta))
    }

    pub fn status(&self, source: &str, max_age: Duration, now: NaiveDateTime) -> CacheStatus {
        match self.meta() {
            None => CacheStatus::Missing,
            Some(meta) if meta.source != source => CacheStatus::OtherSource,
            Some(meta) if now - meta.fetched_at > max_age => CacheStatus::Stale,
            Some(_) => CacheStatus::Fresh,
        }
    }

    /// Remove cached files. Missing files are not an error.
    pub fn clear(&self) -> Result<(), DataError> {
        for path in [self.data_path(), self.meta_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(DataError::CacheError(format!(
                        "remove {}: {e}",
                        path.display()
                    )))
                }
            }
        }
        Ok(())
    }
}
