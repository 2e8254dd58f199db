//! Time-of-day slot labels.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SlotError, SlotResult};

/// Start of a one-hour bookable window, as a zero-padded `HH:00` or `HH:30`.
///
/// Labels are always zero-padded, so the derived string ordering is also the
/// chronological ordering within a day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn parse(label: &str) -> SlotResult<Self> {
        let invalid = || SlotError::InvalidTimeSlot(label.to_string());

        let (hours, minutes) = label.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u32 = hours.parse().map_err(|_| invalid())?;
        if hour > 23 || !(minutes == "00" || minutes == "30") {
            return Err(invalid());
        }

        Ok(TimeSlot(label.to_string()))
    }

    /// Build a slot from an hour and half-hour flag.
    pub fn at(hour: u32, half_past: bool) -> SlotResult<Self> {
        if hour > 23 {
            return Err(SlotError::InvalidTimeSlot(format!("{hour}:??")));
        }
        let minutes = if half_past { 30 } else { 0 };
        Ok(TimeSlot(format!("{hour:02}:{minutes:02}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Parsing has already restricted the label to a valid wall-clock time
        NaiveTime::parse_from_str(&self.0, "%H:%M").unwrap_or(NaiveTime::MIN)
    }

    pub fn hour(&self) -> u32 {
        self.to_naive_time().hour()
    }

    /// Hourly labels from `start` up to and including `end`.
    pub fn hourly(start: u32, end: u32) -> Vec<TimeSlot> {
        (start..=end.min(23))
            .filter_map(|hour| TimeSlot::at(hour, false).ok())
            .collect()
    }
}

impl FromStr for TimeSlot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::parse(s)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        TimeSlot::parse(&label).map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of slots the engine accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBounds {
    pub earliest: TimeSlot,
    pub latest: TimeSlot,
}

impl Default for SlotBounds {
    fn default() -> Self {
        SlotBounds {
            earliest: TimeSlot("00:00".to_string()),
            latest: TimeSlot("23:30".to_string()),
        }
    }
}

impl SlotBounds {
    pub fn new(earliest: TimeSlot, latest: TimeSlot) -> SlotResult<Self> {
        if earliest > latest {
            return Err(SlotError::Config(format!(
                "earliest_slot {earliest} is after latest_slot {latest}"
            )));
        }
        Ok(SlotBounds { earliest, latest })
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        *slot >= self.earliest && *slot <= self.latest
    }

    /// Parse `label` and check it against the bounds.
    /// Returns None for anything the engine should ignore.
    pub fn accept(&self, label: &str) -> Option<TimeSlot> {
        TimeSlot::parse(label).ok().filter(|slot| self.contains(slot))
    }
}
