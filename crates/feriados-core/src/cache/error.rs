use std::path::PathBuf;

use thiserror::Error;

/// Failures at the cache boundary. Callers treat every variant as "no data
/// available" for the current request.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to fetch holidays for {year}: {source}")]
    FetchFailed {
        year: i32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Cache file {} is corrupt: {source}", .path.display())]
    CorruptCache {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to remove cache file {}: {source}", .path.display())]
    InvalidateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    pub(crate) fn fetch_failed(
        year: i32,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        CacheError::FetchFailed {
            year,
            source: source.into(),
        }
    }

    pub(crate) fn corrupt(
        path: PathBuf,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        CacheError::CorruptCache {
            path,
            source: source.into(),
        }
    }
}
