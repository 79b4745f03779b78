use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Compact set of weekdays a session (or the whole system) may trade on.
///
/// Serialized as a list of weekday names so registry files stay readable:
/// `["Mon", "Tue", "Wed", "Thu", "Fri"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    /// Empty mask - no trading day matches
    pub const NONE: WeekdayMask = WeekdayMask(0);

    /// Build a mask from an explicit list of days
    pub fn from_days(days: &[Weekday]) -> Self {
        let mut mask = 0u8;
        for day in days {
            mask |= 1u8 << day.num_days_from_monday();
        }
        WeekdayMask(mask)
    }

    /// Monday through Friday
    pub fn weekdays() -> Self {
        Self::from_days(&[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    /// All seven days (24/7 venues)
    pub fn all_days() -> Self {
        WeekdayMask(0x7F)
    }

    /// Is the given day in the mask?
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1u8 << day.num_days_from_monday()) != 0
    }

    /// Days in the mask, Monday first
    pub fn days(&self) -> Vec<Weekday> {
        let mut out = Vec::new();
        let mut day = Weekday::Mon;
        for _ in 0..7 {
            if self.contains(day) {
                out.push(day);
            }
            day = day.succ();
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for WeekdayMask {
    fn default() -> Self {
        Self::weekdays()
    }
}

impl TryFrom<Vec<String>> for WeekdayMask {
    type Error = ConfigError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        let mut days = Vec::with_capacity(names.len());
        for name in names {
            let day = name
                .parse::<Weekday>()
                .map_err(|_| ConfigError::UnknownWeekday(name.clone()))?;
            days.push(day);
        }
        Ok(WeekdayMask::from_days(&days))
    }
}

impl From<WeekdayMask> for Vec<String> {
    fn from(mask: WeekdayMask) -> Self {
        mask.days().iter().map(|d| d.to_string()).collect()
    }
}
