//! Next-holiday selection.
//!
//! `HolidaySelector` pulls the current year's list from the [`CacheStore`]
//! and returns the first record, in source order, that passes the
//! [`FilterPolicy`]. Cache failures are logged and surface as `None`.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::models::holiday::is_weekend;
use crate::models::{FilterPolicy, HolidayDataset, HolidayRecord, NextHoliday};

pub struct HolidaySelector {
    store: CacheStore,
}

impl HolidaySelector {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Next qualifying holiday relative to the local date.
    pub async fn next_holiday(&self, policy: FilterPolicy) -> Option<NextHoliday> {
        self.next_holiday_on(Local::now().date_naive(), policy).await
    }

    /// Next qualifying holiday relative to `today`.
    pub async fn next_holiday_on(
        &self,
        today: NaiveDate,
        policy: FilterPolicy,
    ) -> Option<NextHoliday> {
        self.select_from_store(today, policy, false).await
    }

    /// "Ver próximo": no filters applied.
    pub async fn next_unfiltered(&self) -> Option<NextHoliday> {
        self.next_holiday(FilterPolicy::none()).await
    }

    /// "Ver próximo salteando fin de semana".
    pub async fn next_skipping_weekends(&self) -> Option<NextHoliday> {
        self.next_holiday(FilterPolicy::skip_weekends()).await
    }

    /// Drop the cached list, fetch it again and recompute.
    pub async fn refresh(&self, policy: FilterPolicy) -> Option<NextHoliday> {
        self.refresh_on(Local::now().date_naive(), policy).await
    }

    pub async fn refresh_on(&self, today: NaiveDate, policy: FilterPolicy) -> Option<NextHoliday> {
        self.select_from_store(today, policy, true).await
    }

    async fn select_from_store(
        &self,
        today: NaiveDate,
        policy: FilterPolicy,
        force_refresh: bool,
    ) -> Option<NextHoliday> {
        // The store already logged the cause
        let dataset = self
            .store
            .get_for_year(today.year(), force_refresh)
            .await
            .ok()?;

        let next = select_next(&dataset, today, policy);
        if next.is_none() {
            debug!(%today, ?policy, "No qualifying holiday left this year");
        }
        next
    }
}

/// First record of `dataset` that qualifies under `policy`, with its date
/// taken in `today`'s year.
pub fn select_next(
    dataset: &HolidayDataset,
    today: NaiveDate,
    policy: FilterPolicy,
) -> Option<NextHoliday> {
    let year = today.year();
    dataset.iter().find_map(|record| {
        let date = resolve_date(record, year)?;
        qualifies(date, today, policy).then(|| NextHoliday::new(record.clone(), date))
    })
}

/// Whether a holiday on `date` is a candidate on `today`.
pub fn qualifies(date: NaiveDate, today: NaiveDate, policy: FilterPolicy) -> bool {
    let in_range = if policy.skip_today {
        date > today
    } else {
        date >= today
    };
    in_range && !(policy.skip_weekend && is_weekend(date))
}

fn resolve_date(record: &HolidayRecord, year: i32) -> Option<NaiveDate> {
    let date = record.date_in(year);
    if date.is_none() {
        warn!(
            year,
            day = record.day,
            month = record.month,
            reason = %record.reason,
            "Skipping holiday with invalid date"
        );
    }
    date
}
