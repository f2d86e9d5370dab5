//! Data models for holiday data.
//!
//! - `HolidayRecord`: one dated entry from the yearly API response
//! - `HolidayDataset`: a year's records in the order the API returns them
//! - `FilterPolicy`: the skip-weekend / skip-today selection flags
//! - `NextHoliday`: a selected record resolved to its calendar date

pub mod holiday;
pub mod policy;

pub use holiday::{HolidayDataset, HolidayRecord, NextHoliday};
pub use policy::FilterPolicy;
