//! Local caching of the yearly holiday list.
//!
//! This module provides the `CacheStore`, the only component that touches
//! the on-disk artifact. One JSON file per year holds the API body exactly as
//! it was received; it is reused across runs until a refresh deletes it or
//! the calendar year changes.

pub mod error;
pub mod store;

pub use error::CacheError;
pub use store::CacheStore;
