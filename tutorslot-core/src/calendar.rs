//! Weekly recurring availability.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::time_slot::TimeSlot;
use crate::weekday::WeekdayKey;

/// Slot labels per weekday.
///
/// All seven weekdays are always present, a day without availability maps to
/// an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayCalendar {
    days: BTreeMap<WeekdayKey, BTreeSet<TimeSlot>>,
}

impl Default for WeekdayCalendar {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeekdayCalendar {
    pub fn empty() -> Self {
        WeekdayCalendar {
            days: WeekdayKey::ALL
                .into_iter()
                .map(|day| (day, BTreeSet::new()))
                .collect(),
        }
    }

    /// Build a calendar from untrusted deserialized data.
    ///
    /// - missing weekdays become empty
    /// - non-string or malformed slot labels are dropped
    /// - a day whose value is not an array is treated as empty
    /// - anything that is not an object yields the empty calendar
    pub fn normalize(raw: &Value) -> Self {
        let mut calendar = Self::empty();

        let Some(object) = raw.as_object() else {
            if !raw.is_null() {
                tracing::debug!("Discarding non-object availability data");
            }
            return calendar;
        };

        for (key, value) in object {
            let Ok(day) = key.parse::<WeekdayKey>() else {
                tracing::debug!("Ignoring unknown weekday key '{}'", key);
                continue;
            };

            let Some(entries) = value.as_array() else {
                tracing::debug!("Discarding non-array slots for {}", day);
                continue;
            };

            let slots = calendar.slots_mut(day);
            for entry in entries {
                match entry.as_str().map(TimeSlot::parse) {
                    Some(Ok(slot)) => {
                        slots.insert(slot);
                    }
                    _ => tracing::debug!("Dropping malformed slot {} for {}", entry, day),
                }
            }
        }

        calendar
    }

    pub fn slots(&self, day: WeekdayKey) -> &BTreeSet<TimeSlot> {
        // Every key is inserted on construction and never removed
        &self.days[&day]
    }

    pub fn contains(&self, day: WeekdayKey, slot: &TimeSlot) -> bool {
        self.slots(day).contains(slot)
    }

    /// Number of (day, slot) pairs.
    pub fn total_slots(&self) -> usize {
        self.days.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeSet::is_empty)
    }

    /// Days with their slots, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (WeekdayKey, &BTreeSet<TimeSlot>)> + Clone {
        self.days.iter().map(|(day, slots)| (*day, slots))
    }

    pub(crate) fn slots_mut(&mut self, day: WeekdayKey) -> &mut BTreeSet<TimeSlot> {
        self.days.entry(day).or_default()
    }

    pub(crate) fn set_day(&mut self, day: WeekdayKey, slots: BTreeSet<TimeSlot>) {
        self.days.insert(day, slots);
    }

    pub(crate) fn clear(&mut self) {
        for slots in self.days.values_mut() {
            slots.clear();
        }
    }
}

impl Serialize for WeekdayCalendar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeekdayCalendar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(WeekdayCalendar::normalize(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slot(label: &str) -> TimeSlot {
        TimeSlot::parse(label).unwrap()
    }

    #[test]
    fn test_empty_has_all_days() {
        let calendar = WeekdayCalendar::empty();
        assert_eq!(calendar.iter().count(), 7);
        for day in WeekdayKey::ALL {
            assert!(calendar.slots(day).is_empty());
        }
        assert!(calendar.is_empty());
        assert_eq!(calendar.total_slots(), 0);
    }

    #[test]
    fn test_normalize_fills_missing_days() {
        let calendar = WeekdayCalendar::normalize(&json!({ "monday": ["09:00"] }));
        assert_eq!(calendar.iter().count(), 7);
        assert!(calendar.contains(WeekdayKey::Monday, &slot("09:00")));
        assert!(calendar.slots(WeekdayKey::Sunday).is_empty());
    }

    #[test]
    fn test_normalize_drops_malformed_entries() {
        let raw = json!({
            "monday": ["10:00", 9, null, "9am", "09:00", "10:00"],
            "tuesday": "14:00",
            "wednesday": { "slot": "14:00" },
            "someday": ["12:00"]
        });
        let calendar = WeekdayCalendar::normalize(&raw);

        let monday: Vec<&str> = calendar
            .slots(WeekdayKey::Monday)
            .iter()
            .map(TimeSlot::as_str)
            .collect();
        assert_eq!(monday, vec!["09:00", "10:00"]);
        assert!(calendar.slots(WeekdayKey::Tuesday).is_empty());
        assert!(calendar.slots(WeekdayKey::Wednesday).is_empty());
        assert_eq!(calendar.total_slots(), 2);
    }

    #[test]
    fn test_normalize_non_object_yields_empty() {
        for raw in [json!(null), json!(42), json!("monday"), json!([["09:00"]]), json!(true)] {
            let calendar = WeekdayCalendar::normalize(&raw);
            assert_eq!(calendar, WeekdayCalendar::empty());
            assert_eq!(calendar.iter().count(), 7);
        }
    }

    #[test]
    fn test_serialize_lists_every_day() {
        let mut calendar = WeekdayCalendar::empty();
        calendar.slots_mut(WeekdayKey::Friday).insert(slot("15:00"));

        let value = serde_json::to_value(&calendar).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert_eq!(object["friday"], json!(["15:00"]));
        assert_eq!(object["monday"], json!([]));
    }

    #[test]
    fn test_deserialize_goes_through_normalize() {
        let calendar: WeekdayCalendar =
            serde_json::from_str(r#"{"Thursday": ["11:30", "bogus"]}"#).unwrap();
        assert!(calendar.contains(WeekdayKey::Thursday, &slot("11:30")));
        assert_eq!(calendar.total_slots(), 1);
    }
}
