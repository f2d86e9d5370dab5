//! Text shown to the user: the panel countdown label and the notification
//! for a selected holiday. Dates are formatted for Argentina (`es_AR`).

use std::fmt;

use chrono::{Locale, NaiveDate, NaiveTime};

use crate::models::NextHoliday;

const LOCALE: Locale = Locale::es_AR;

/// Days left until a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Today,
    DaysRemaining(i64),
}

impl Countdown {
    pub fn between(today: NaiveDate, holiday: NaiveDate) -> Self {
        match (holiday - today).num_days() {
            0 => Countdown::Today,
            days => Countdown::DaysRemaining(days),
        }
    }

    pub fn for_holiday(next: &NextHoliday, today: NaiveDate) -> Self {
        Self::between(today, next.date)
    }

    pub fn days(&self) -> i64 {
        match self {
            Countdown::Today => 0,
            Countdown::DaysRemaining(days) => *days,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Today => write!(f, "Es hoy!"),
            Countdown::DaysRemaining(1) => write!(f, "Falta 1 día!"),
            Countdown::DaysRemaining(days) => write!(f, "Faltan {} días!", days),
        }
    }
}

/// Title and body of the "next holiday" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn for_holiday(next: &NextHoliday) -> Self {
        let record = &next.record;
        let mut body = format!(
            "El {} {} y de tipo {}",
            weekday_name(next.date),
            long_date(next.date),
            record.kind
        );
        if let Some(original) = record.original.as_deref() {
            body.push_str(&format!(" (trasladado del {})", original.replace('-', "/")));
        }

        Self {
            title: format!("Próximo feriado: {}", record.reason),
            body,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.body)
    }
}

/// Full weekday name, e.g. "domingo".
pub fn weekday_name(date: NaiveDate) -> String {
    localized(date, "%A")
}

/// Long date, e.g. "25 de mayo de 2025".
pub fn long_date(date: NaiveDate) -> String {
    localized(date, "%-d de %B de %Y")
}

// Localized formatting lives on DateTime; midnight UTC keeps the calendar date.
fn localized(date: NaiveDate, fmt: &str) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(fmt, LOCALE)
        .to_string()
}
