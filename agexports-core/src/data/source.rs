//! Dataset sources and structured error types.
//!
//! The DatasetSource trait abstracts over where the raw CSV comes from (HTTP
//! or a local file) so the loader can be exercised against in-memory sources.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Public location of the 2011 US agricultural exports dataset.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/Dash-Course/US-Exports/2011_us_ag_exports.csv";

/// Structured error types for dataset operations.
///
/// All of these are fatal at startup: the dashboard cannot run without a
/// valid table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("cannot read dataset at {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("duplicate state code: {0}")]
    DuplicateCode(String),

    #[error("dataset has no rows")]
    EmptyTable,

    #[error("cache error: {0}")]
    CacheError(String),

    #[error("no cached dataset in {0} and offline mode is enabled")]
    NoCachedData(PathBuf),
}

/// Where the raw dataset text comes from.
pub trait DatasetSource: Send + Sync {
    /// Stable identifier of this source, used as the cache key.
    fn describe(&self) -> String;

    /// Fetch the raw CSV text.
    fn fetch(&self) -> Result<String, DataError>;

    /// Whether fetched text should go through the on-disk cache.
    fn cacheable(&self) -> bool {
        true
    }
}

/// Fetches the dataset over HTTP, retrying up to `max_retries` times.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration, max_retries: u32) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("agexports/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            max_retries,
            base_delay: Duration::from_millis(500),
        })
    }

    fn fetch_once(&self) -> Result<String, DataError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        resp.text()
            .map_err(|e| DataError::NetworkUnreachable(format!("reading body: {e}")))
    }
}

/// Only transport failures, throttling and server errors are worth another attempt.
fn is_retryable(err: &DataError) -> bool {
    match err {
        DataError::NetworkUnreachable(_) => true,
        DataError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String, DataError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once() {
                Ok(body) => {
                    tracing::info!(url = %self.url, bytes = body.len(), "dataset downloaded");
                    return Ok(body);
                }
                Err(e) if attempt < self.max_retries && is_retryable(&e) => {
                    let delay = self.base_delay * 2u32.pow(attempt);
                    tracing::warn!(url = %self.url, attempt, error = %e, "fetch failed, retrying in {delay:?}");
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Reads the dataset from a local CSV file. Never cached.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, DataError> {
        std::fs::read_to_string(&self.path).map_err(|e| DataError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn cacheable(&self) -> bool {
        false
    }
}

/// In-memory source, handy for tests and embedding.
pub struct StaticSource {
    name: String,
    body: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

impl DatasetSource for StaticSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<String, DataError> {
        Ok(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_policy() {
        assert!(is_retryable(&DataError::NetworkUnreachable("reset".into())));
        assert!(is_retryable(&DataError::HttpStatus {
            status: 503,
            url: "u".into()
        }));
        assert!(is_retryable(&DataError::HttpStatus {
            status: 429,
            url: "u".into()
        }));
        assert!(!is_retryable(&DataError::HttpStatus {
            status: 404,
            url: "u".into()
        }));
        assert!(!is_retryable(&DataError::EmptyTable));
    }

    #[test]
    fn file_source_reports_missing_file() {
        let source = FileSource::new("/nonexistent/agexports/data.csv");
        assert!(!source.cacheable());
        match source.fetch() {
            Err(DataError::Unreadable { path, .. }) => {
                assert!(path.ends_with("data.csv"));
            }
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn static_source_returns_body() {
        let source = StaticSource::new("mem", "code,state\n");
        assert_eq!(source.describe(), "mem");
        assert_eq!(source.fetch().unwrap(), "code,state\n");
        assert!(source.cacheable());
    }
}
