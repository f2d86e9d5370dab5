//! Core library for feriados.
//!
//! Works out the next Argentine public holiday from the yearly list published
//! by nolaborables.com.ar, caching that list on disk between runs.
//!
//! - [`api`]: HTTP client and the `HolidaySource` seam
//! - [`cache`]: the on-disk artifact (`CacheStore`)
//! - [`selector`]: filter policy and next-holiday selection
//! - [`display`]: countdown label and notification text
//! - [`config`] / [`settings`]: persisted and live selection settings

pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod models;
pub mod selector;
pub mod settings;

use std::sync::Arc;

use anyhow::Result;

pub use api::{ApiError, HolidayClient, HolidaySource};
pub use cache::{CacheError, CacheStore};
pub use config::Config;
pub use display::{Countdown, Notification};
pub use models::{FilterPolicy, HolidayDataset, HolidayRecord, NextHoliday};
pub use selector::{select_next, HolidaySelector};
pub use settings::Settings;

/// Build a selector backed by the HTTP API and the configured cache directory.
pub fn open(config: &Config) -> Result<HolidaySelector> {
    let client = HolidayClient::with_base_url(config.api_url())?;
    let store = CacheStore::new(config.cache_dir()?, Arc::new(client))?;
    Ok(HolidaySelector::new(store))
}
