use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Holiday classification as returned by the API.
pub const KIND_FIXED: &str = "inamovible";
pub const KIND_MOVABLE: &str = "trasladable";

/// One holiday entry from `GET /feriados/{year}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    #[serde(rename = "dia")]
    pub day: u32,
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Link to background information about the holiday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// For moved holidays, the original date as "dd-mm".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

impl HolidayRecord {
    pub fn new(day: u32, month: u32, reason: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            day,
            month,
            reason: reason.into(),
            kind: kind.into(),
            id: None,
            info: None,
            original: None,
        }
    }

    /// Calendar date of this holiday in `year`, or `None` if day/month don't form one.
    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

/// A year's holidays, kept in the order the source provided them
/// (ascending month/day).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HolidayDataset {
    pub year: i32,
    pub holidays: Vec<HolidayRecord>,
}

impl HolidayDataset {
    pub fn new(year: i32, holidays: Vec<HolidayRecord>) -> Self {
        Self { year, holidays }
    }

    /// Parse the raw JSON array body of the API (and of the cache file).
    pub fn from_json(year: i32, json: &str) -> serde_json::Result<Self> {
        let holidays: Vec<HolidayRecord> = serde_json::from_str(json)?;
        Ok(Self { year, holidays })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HolidayRecord> {
        self.holidays.iter()
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl<'a> IntoIterator for &'a HolidayDataset {
    type Item = &'a HolidayRecord;
    type IntoIter = std::slice::Iter<'a, HolidayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.holidays.iter()
    }
}

/// A selected holiday resolved to its calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextHoliday {
    pub record: HolidayRecord,
    pub date: NaiveDate,
}

impl NextHoliday {
    pub fn new(record: HolidayRecord, date: NaiveDate) -> Self {
        Self { record, date }
    }

    /// Whole days from `today` until the holiday (0 when it is today).
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"motivo":"Año Nuevo","tipo":"inamovible","dia":1,"mes":1,"id":"año-nuevo"},
        {"motivo":"Paso a la Inmortalidad del General Martín Miguel de Güemes","tipo":"trasladable","original":"17-06","dia":16,"mes":6,"id":"guemes","info":"https://es.wikipedia.org/wiki/Mart%C3%ADn_Miguel_de_G%C3%BCemes"},
        {"motivo":"Puente turístico","tipo":"puente","dia":15,"mes":8,"extra":"ignored"}
    ]"#;

    #[test]
    fn test_parse_api_response() {
        let dataset = HolidayDataset::from_json(2025, SAMPLE).unwrap();
        assert_eq!(dataset.year, 2025);
        assert_eq!(dataset.len(), 3);

        let first = &dataset.holidays[0];
        assert_eq!(first.day, 1);
        assert_eq!(first.month, 1);
        assert_eq!(first.reason, "Año Nuevo");
        assert_eq!(first.kind, KIND_FIXED);
        assert_eq!(first.id.as_deref(), Some("año-nuevo"));
        assert!(first.original.is_none());

        let moved = &dataset.holidays[1];
        assert_eq!(moved.kind, KIND_MOVABLE);
        assert_eq!(moved.original.as_deref(), Some("17-06"));
        assert!(moved.info.is_some());

        assert_eq!(dataset.holidays[2].kind, "puente");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(HolidayDataset::from_json(2025, r#"{"error":"not found"}"#).is_err());
        assert!(HolidayDataset::from_json(2025, "<html></html>").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(HolidayDataset::from_json(2025, r#"[{"dia":1,"mes":1}]"#).is_err());
    }

    #[test]
    fn test_date_in_validates_calendar() {
        let leap = HolidayRecord::new(29, 2, "Bisiesto", KIND_FIXED);
        assert_eq!(leap.date_in(2024), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(leap.date_in(2025), None);

        let bad_month = HolidayRecord::new(1, 13, "Nunca", KIND_FIXED);
        assert_eq!(bad_month.date_in(2025), None);
    }

    #[test]
    fn test_is_weekend() {
        // 2025-05-24 is a Saturday
        let sat = NaiveDate::from_ymd_opt(2025, 5, 24).unwrap();
        let sun = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let mon = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
        assert!(is_weekend(sat));
        assert!(is_weekend(sun));
        assert!(!is_weekend(mon));
    }

    #[test]
    fn test_days_until() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let next = NextHoliday::new(
            HolidayRecord::new(25, 5, "Revolución de Mayo", KIND_FIXED),
            NaiveDate::from_ymd_opt(2025, 5, 25).unwrap(),
        );
        assert_eq!(next.days_until(today), 5);
        assert!(!next.is_today(today));
        assert_eq!(next.days_until(next.date), 0);
        assert!(next.is_today(next.date));
    }
}
