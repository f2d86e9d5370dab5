use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use tracing::{debug, info, warn};

use super::CacheError;
use crate::api::HolidaySource;
use crate::models::HolidayDataset;

/// Artifact file names are `feriados_{year}.json`.
const ARTIFACT_PREFIX: &str = "feriados_";
const ARTIFACT_EXTENSION: &str = "json";

/// Distinguishes temp files of overlapping writes within one process.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Owns the on-disk holiday artifact and the source it is filled from.
pub struct CacheStore {
    cache_dir: PathBuf,
    source: Arc<dyn HolidaySource>,
}

impl CacheStore {
    pub fn new(cache_dir: PathBuf, source: Arc<dyn HolidaySource>) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;
        Ok(Self { cache_dir, source })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn artifact_path(&self, year: i32) -> PathBuf {
        self.cache_dir
            .join(format!("{}{}.{}", ARTIFACT_PREFIX, year, ARTIFACT_EXTENSION))
    }

    pub fn exists(&self, year: i32) -> bool {
        self.artifact_path(year).is_file()
    }

    /// Holidays for the current local year.
    pub async fn get(&self, force_refresh: bool) -> Result<HolidayDataset, CacheError> {
        self.get_for_year(Local::now().year(), force_refresh).await
    }

    /// Holidays for `year`, fetching and persisting them first if there is no
    /// artifact yet (or `force_refresh` removed it).
    pub async fn get_for_year(
        &self,
        year: i32,
        force_refresh: bool,
    ) -> Result<HolidayDataset, CacheError> {
        let result = self.load_or_fetch(year, force_refresh).await;
        if let Err(ref e) = result {
            warn!(year, error = %e, "Holiday data unavailable");
        }
        result
    }

    async fn load_or_fetch(
        &self,
        year: i32,
        force_refresh: bool,
    ) -> Result<HolidayDataset, CacheError> {
        if force_refresh {
            self.invalidate(year)?;
        }

        if !self.exists(year) {
            self.fetch_and_persist(year).await?;
        }

        self.read(year)
    }

    /// Delete the artifact for `year`. Returns whether a file was removed;
    /// a missing file is not an error.
    pub fn invalidate(&self, year: i32) -> Result<bool, CacheError> {
        let path = self.artifact_path(year);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(year, path = %path.display(), "Holiday cache invalidated");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::InvalidateFailed { path, source }),
        }
    }

    async fn fetch_and_persist(&self, year: i32) -> Result<(), CacheError> {
        info!(year, "No cached holidays, fetching");

        let body = self
            .source
            .fetch_year(year)
            .await
            .map_err(|e| CacheError::fetch_failed(year, e))?;

        // Nothing unparseable ever reaches the disk
        let dataset =
            HolidayDataset::from_json(year, &body).map_err(|e| CacheError::fetch_failed(year, e))?;

        self.write_atomic(year, &body)
            .map_err(|e| CacheError::fetch_failed(year, e))?;

        info!(year, count = dataset.len(), "Holidays cached");
        self.prune_other_years(year);
        Ok(())
    }

    /// Write through a temp file in the same directory, then rename over the
    /// artifact, so readers never observe a partial file.
    fn write_atomic(&self, year: i32, body: &str) -> io::Result<()> {
        let path = self.artifact_path(year);
        let tmp = self.cache_dir.join(format!(
            ".{}{}.{}.{}.tmp",
            ARTIFACT_PREFIX,
            year,
            std::process::id(),
            WRITE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        let result = std::fs::write(&tmp, body).and_then(|()| std::fs::rename(&tmp, &path));
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp);
        }
        result
    }

    fn read(&self, year: i32) -> Result<HolidayDataset, CacheError> {
        let path = self.artifact_path(year);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => return Err(CacheError::corrupt(path, e)),
        };

        let dataset =
            HolidayDataset::from_json(year, &contents).map_err(|e| CacheError::corrupt(path, e))?;
        debug!(year, count = dataset.len(), "Loaded holidays from cache");
        Ok(dataset)
    }

    /// Remove artifacts of other years so a single artifact exists at a time.
    fn prune_other_years(&self, keep_year: i32) {
        let entries = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(error = %e, "Failed to list cache directory for pruning");
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(year) = artifact_year(&path) else {
                continue;
            };
            if year == keep_year {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => debug!(year, "Pruned stale holiday cache"),
                Err(e) => warn!(year, error = %e, "Failed to prune stale holiday cache"),
            }
        }
    }
}

/// Year encoded in an artifact file name, if `path` is one.
fn artifact_year(path: &Path) -> Option<i32> {
    if path.extension()? != ARTIFACT_EXTENSION {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix(ARTIFACT_PREFIX)?
        .parse()
        .ok()
}

// ============================================================================
// Tests
// ============================================================================
