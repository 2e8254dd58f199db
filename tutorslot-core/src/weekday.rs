//! Weekday buckets used as recurrence keys.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;

/// One of the seven weekdays availability recurs on.
///
/// Variants are declared Monday first so maps keyed by `WeekdayKey` iterate
/// in the order a week view displays them. The ordinal used for date math
/// counts from Sunday instead (see [`WeekdayKey::ordinal`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayKey {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayKey {
    /// All seven keys, Monday first.
    pub const ALL: [WeekdayKey; 7] = [
        WeekdayKey::Monday,
        WeekdayKey::Tuesday,
        WeekdayKey::Wednesday,
        WeekdayKey::Thursday,
        WeekdayKey::Friday,
        WeekdayKey::Saturday,
        WeekdayKey::Sunday,
    ];

    /// Monday through Friday.
    pub const WORKDAYS: [WeekdayKey; 5] = [
        WeekdayKey::Monday,
        WeekdayKey::Tuesday,
        WeekdayKey::Wednesday,
        WeekdayKey::Thursday,
        WeekdayKey::Friday,
    ];

    /// Day number with Sunday = 0 through Saturday = 6.
    pub fn ordinal(self) -> u32 {
        match self {
            WeekdayKey::Sunday => 0,
            WeekdayKey::Monday => 1,
            WeekdayKey::Tuesday => 2,
            WeekdayKey::Wednesday => 3,
            WeekdayKey::Thursday => 4,
            WeekdayKey::Friday => 5,
            WeekdayKey::Saturday => 6,
        }
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            0 => Some(WeekdayKey::Sunday),
            1 => Some(WeekdayKey::Monday),
            2 => Some(WeekdayKey::Tuesday),
            3 => Some(WeekdayKey::Wednesday),
            4 => Some(WeekdayKey::Thursday),
            5 => Some(WeekdayKey::Friday),
            6 => Some(WeekdayKey::Saturday),
            _ => None,
        }
    }

    /// The weekday `date` falls on.
    pub fn of_date(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekdayKey::Monday => "monday",
            WeekdayKey::Tuesday => "tuesday",
            WeekdayKey::Wednesday => "wednesday",
            WeekdayKey::Thursday => "thursday",
            WeekdayKey::Friday => "friday",
            WeekdayKey::Saturday => "saturday",
            WeekdayKey::Sunday => "sunday",
        }
    }

    /// Two-letter code used by RRULE BYDAY.
    pub fn ics_code(self) -> &'static str {
        match self {
            WeekdayKey::Monday => "MO",
            WeekdayKey::Tuesday => "TU",
            WeekdayKey::Wednesday => "WE",
            WeekdayKey::Thursday => "TH",
            WeekdayKey::Friday => "FR",
            WeekdayKey::Saturday => "SA",
            WeekdayKey::Sunday => "SU",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, WeekdayKey::Saturday | WeekdayKey::Sunday)
    }
}

impl From<Weekday> for WeekdayKey {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => WeekdayKey::Monday,
            Weekday::Tue => WeekdayKey::Tuesday,
            Weekday::Wed => WeekdayKey::Wednesday,
            Weekday::Thu => WeekdayKey::Thursday,
            Weekday::Fri => WeekdayKey::Friday,
            Weekday::Sat => WeekdayKey::Saturday,
            Weekday::Sun => WeekdayKey::Sunday,
        }
    }
}

impl From<WeekdayKey> for Weekday {
    fn from(day: WeekdayKey) -> Self {
        match day {
            WeekdayKey::Monday => Weekday::Mon,
            WeekdayKey::Tuesday => Weekday::Tue,
            WeekdayKey::Wednesday => Weekday::Wed,
            WeekdayKey::Thursday => Weekday::Thu,
            WeekdayKey::Friday => Weekday::Fri,
            WeekdayKey::Saturday => Weekday::Sat,
            WeekdayKey::Sunday => Weekday::Sun,
        }
    }
}

impl FromStr for WeekdayKey {
    type Err = SlotError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        WeekdayKey::ALL
            .into_iter()
            .find(|day| day.as_str() == lower || day.as_str()[..3] == lower)
            .ok_or_else(|| SlotError::InvalidWeekday(s.to_string()))
    }
}

impl fmt::Display for WeekdayKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
