//! Projection of weekly availability onto concrete dates.
//!
//! Occurrences are derived values: they are recomputed from the calendar and a
//! reference date whenever either changes and are never persisted. All dates
//! and times are local wall-clock values.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::calendar::WeekdayCalendar;
use crate::time_slot::TimeSlot;
use crate::weekday::WeekdayKey;

/// Length of every bookable window, regardless of slot granularity.
pub const SLOT_DURATION_MINUTES: i64 = 60;

/// A dated instance of a recurring (weekday, slot) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub weekday: WeekdayKey,
    pub time_slot: TimeSlot,
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Occurrence {
    pub fn new(weekday: WeekdayKey, time_slot: TimeSlot, date: NaiveDate) -> Self {
        let start = date.and_time(time_slot.to_naive_time());
        Occurrence {
            weekday,
            time_slot,
            date,
            start,
            end: start + Duration::minutes(SLOT_DURATION_MINUTES),
        }
    }
}

/// Soonest date on or after `reference` that falls on `day`.
///
/// When `reference` already is a `day`, the reference itself is returned.
pub fn next_date_for_weekday(reference: NaiveDate, day: WeekdayKey) -> NaiveDate {
    let current = reference.weekday().num_days_from_sunday();
    let offset = (day.ordinal() + 7 - current) % 7;
    reference + Duration::days(i64::from(offset))
}

pub fn weekday_from_date(date: NaiveDate) -> WeekdayKey {
    WeekdayKey::of_date(date)
}

/// Next occurrence of every slot in `calendar`, counting from `reference`.
///
/// The iterator borrows the calendar and can be cloned to restart it. No order
/// across weekdays is guaranteed; see [`sort_by_start`].
pub fn project(
    calendar: &WeekdayCalendar,
    reference: NaiveDate,
) -> impl Iterator<Item = Occurrence> + Clone + '_ {
    calendar
        .iter()
        .filter(|(_, slots)| !slots.is_empty())
        .flat_map(move |(day, slots)| {
            let date = next_date_for_weekday(reference, day);
            slots
                .iter()
                .map(move |slot| Occurrence::new(day, slot.clone(), date))
        })
}

/// Every occurrence dated within `from..=to`, sorted by start.
pub fn project_range(calendar: &WeekdayCalendar, from: NaiveDate, to: NaiveDate) -> Vec<Occurrence> {
    if to < from {
        return Vec::new();
    }

    let mut occurrences: Vec<Occurrence> = from
        .iter_days()
        .take_while(|date| *date <= to)
        .flat_map(|date| {
            let day = weekday_from_date(date);
            calendar
                .slots(day)
                .iter()
                .map(move |slot| Occurrence::new(day, slot.clone(), date))
        })
        .collect();

    sort_by_start(&mut occurrences);
    occurrences
}

pub fn sort_by_start(occurrences: &mut [Occurrence]) {
    occurrences.sort_by(|a, b| a.start.cmp(&b.start));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar_with(entries: &[(WeekdayKey, &str)]) -> WeekdayCalendar {
        let mut calendar = WeekdayCalendar::empty();
        for (day, label) in entries {
            calendar.slots_mut(*day).insert(TimeSlot::parse(label).unwrap());
        }
        calendar
    }

    // 2025-03-17 is a Monday
    fn monday() -> NaiveDate {
        date(2025, 3, 17)
    }

    #[test]
    fn test_next_date_same_weekday_is_reference() {
        assert_eq!(next_date_for_weekday(monday(), WeekdayKey::Monday), monday());
        let saturday = date(2025, 3, 22);
        assert_eq!(next_date_for_weekday(saturday, WeekdayKey::Saturday), saturday);
    }

    #[test]
    fn test_next_date_later_in_week() {
        assert_eq!(
            next_date_for_weekday(monday(), WeekdayKey::Wednesday),
            date(2025, 3, 19)
        );
        assert_eq!(
            next_date_for_weekday(monday(), WeekdayKey::Sunday),
            date(2025, 3, 23)
        );
    }

    #[test]
    fn test_next_date_wraps_to_next_week() {
        let friday = date(2025, 3, 21);
        assert_eq!(
            next_date_for_weekday(friday, WeekdayKey::Monday),
            date(2025, 3, 24)
        );
        assert_eq!(
            next_date_for_weekday(friday, WeekdayKey::Thursday),
            date(2025, 3, 27)
        );
    }

    #[test]
    fn test_next_date_across_month_and_year() {
        // 2025-12-31 is a Wednesday
        let new_years_eve = date(2025, 12, 31);
        assert_eq!(
            next_date_for_weekday(new_years_eve, WeekdayKey::Tuesday),
            date(2026, 1, 6)
        );
    }

    #[test]
    fn test_next_date_lands_on_requested_weekday() {
        let start = date(2024, 2, 25);
        for offset in 0..14 {
            let reference = start + Duration::days(offset);
            for day in WeekdayKey::ALL {
                let next = next_date_for_weekday(reference, day);
                assert_eq!(weekday_from_date(next), day);
                assert!(next >= reference);
                assert!((next - reference).num_days() < 7);
            }
        }
    }

    #[test]
    fn test_project_counts_every_slot() {
        let calendar = calendar_with(&[
            (WeekdayKey::Monday, "09:00"),
            (WeekdayKey::Monday, "10:30"),
            (WeekdayKey::Thursday, "14:00"),
            (WeekdayKey::Sunday, "08:00"),
        ]);
        assert_eq!(project(&calendar, monday()).count(), calendar.total_slots());
        assert_eq!(project(&WeekdayCalendar::empty(), monday()).count(), 0);
    }

    #[test]
    fn test_project_single_slot_today() {
        let calendar = calendar_with(&[(WeekdayKey::Monday, "09:00")]);
        let occurrences: Vec<Occurrence> = project(&calendar, monday()).collect();

        assert_eq!(occurrences.len(), 1);
        let occ = &occurrences[0];
        assert_eq!(occ.date, monday());
        assert_eq!(occ.start, monday().and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert_eq!(occ.end, monday().and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
    }

    #[test]
    fn test_half_hour_slot_still_lasts_an_hour() {
        let occ = Occurrence::new(
            WeekdayKey::Tuesday,
            TimeSlot::parse("23:30").unwrap(),
            date(2025, 3, 18),
        );
        assert_eq!(occ.end - occ.start, Duration::minutes(60));
        assert_eq!(occ.end.date(), date(2025, 3, 19));
    }

    #[test]
    fn test_project_is_restartable() {
        let calendar = calendar_with(&[(WeekdayKey::Friday, "11:00"), (WeekdayKey::Friday, "12:00")]);
        let occurrences = project(&calendar, monday());
        let first: Vec<Occurrence> = occurrences.clone().collect();
        let second: Vec<Occurrence> = occurrences.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_project_range_spans_weeks_sorted() {
        let calendar = calendar_with(&[
            (WeekdayKey::Wednesday, "16:00"),
            (WeekdayKey::Monday, "09:00"),
        ]);
        let occurrences = project_range(&calendar, monday(), date(2025, 3, 30));

        let starts: Vec<String> = occurrences
            .iter()
            .map(|o| o.start.format("%Y-%m-%d %H:%M").to_string())
            .collect();
        assert_eq!(
            starts,
            vec![
                "2025-03-17 09:00",
                "2025-03-19 16:00",
                "2025-03-24 09:00",
                "2025-03-26 16:00",
            ]
        );
    }

    #[test]
    fn test_project_range_inverted_is_empty() {
        let calendar = calendar_with(&[(WeekdayKey::Monday, "09:00")]);
        assert!(project_range(&calendar, monday(), date(2025, 3, 10)).is_empty());
    }
}
