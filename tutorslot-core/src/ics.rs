//! iCalendar export of weekly availability.
//!
//! Each (weekday, slot) pair becomes one weekly recurring VEVENT, starting at
//! its next occurrence from the reference date. Times are floating: they are
//! meant to be read in the tutor's local timezone. Recurrence is open-ended
//! unless a number of weeks is given, which becomes the RRULE COUNT.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use icalendar::{Calendar, Component};

use crate::calendar::WeekdayCalendar;
use crate::error::{SlotError, SlotResult};
use crate::projector::{self, Occurrence};

const UID_DOMAIN: &str = "tutorslot";

/// Generate an .ics document describing `calendar` as recurring events.
///
/// With `weeks`, each event repeats that many times; without, it repeats
/// indefinitely.
pub fn generate_ics(
    calendar: &WeekdayCalendar,
    reference: NaiveDate,
    summary: &str,
    weeks: Option<u32>,
) -> SlotResult<String> {
    if summary.contains(['\r', '\n']) {
        return Err(SlotError::IcsGenerate(
            "event summary must be a single line".into(),
        ));
    }
    if weeks == Some(0) {
        return Err(SlotError::IcsGenerate("weeks must be at least 1".into()));
    }

    let mut occurrences: Vec<Occurrence> = projector::project(calendar, reference).collect();
    projector::sort_by_start(&mut occurrences);

    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let mut cal = Calendar::new();

    for occurrence in &occurrences {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&occurrence_uid(occurrence));
        ics_event.summary(summary);
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.add_property("DTSTART", floating(occurrence.start));
        ics_event.add_property("DTEND", floating(occurrence.end));
        ics_event.add_property("RRULE", weekly_rule(occurrence, weeks));
        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Stable across exports, so calendar clients update instead of duplicating.
fn occurrence_uid(occurrence: &Occurrence) -> String {
    format!(
        "{}-{}@{}",
        occurrence.weekday,
        occurrence.time_slot.as_str().replace(':', ""),
        UID_DOMAIN
    )
}

fn weekly_rule(occurrence: &Occurrence, weeks: Option<u32>) -> String {
    let rule = format!("FREQ=WEEKLY;BYDAY={}", occurrence.weekday.ics_code());
    match weeks {
        Some(count) => format!("{rule};COUNT={count}"),
        None => rule,
    }
}

fn floating(datetime: NaiveDateTime) -> String {
    datetime.format("%Y%m%dT%H%M%S").to_string()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with TUTORSLOT
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:TUTORSLOT\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
