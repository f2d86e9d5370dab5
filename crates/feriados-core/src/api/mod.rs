//! HTTP client for the nolaborables.com.ar holiday API.
//!
//! The API is public and unauthenticated. `GET {base}/{year}` returns the
//! full list of holidays for that year as a JSON array.

pub mod client;
pub mod error;

pub use client::{HolidayClient, HolidaySource, DEFAULT_API_URL};
pub use error::ApiError;
