use serde::{Deserialize, Serialize};

/// Exclusion rules applied when picking the next holiday.
///
/// The two flags are independent: any combination is meaningful, e.g. the
/// next non-weekend holiday while still counting a holiday that is today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterPolicy {
    /// Holidays falling on Saturday or Sunday are not candidates.
    #[serde(rename = "skip-weekends", default)]
    pub skip_weekend: bool,
    /// A holiday that is today is not a candidate.
    #[serde(rename = "skip-today", default)]
    pub skip_today: bool,
}

impl FilterPolicy {
    pub fn new(skip_weekend: bool, skip_today: bool) -> Self {
        Self {
            skip_weekend,
            skip_today,
        }
    }

    /// No filters: today's holiday counts, weekends count.
    pub fn none() -> Self {
        Self::default()
    }

    /// Only working-day holidays.
    pub fn skip_weekends() -> Self {
        Self::new(true, false)
    }

    /// All four flag combinations, for exhaustive checks.
    pub fn all() -> [FilterPolicy; 4] {
        [
            Self::new(false, false),
            Self::new(true, false),
            Self::new(false, true),
            Self::new(true, true),
        ]
    }
}
