//! The availability engine.
//!
//! All mutations of a tutor's weekly availability go through
//! [`AvailabilityEngine`]. Each mutating call persists a full snapshot before
//! it returns. A failed save does not undo the in-memory change: the caller
//! gets a [`SaveWarning`] and the next successful save carries the change.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::calendar::WeekdayCalendar;
use crate::error::SlotError;
use crate::projector::{self, Occurrence};
use crate::store::AvailabilityStore;
use crate::template::Template;
use crate::time_slot::{SlotBounds, TimeSlot};
use crate::weekday::WeekdayKey;

/// What a toggle did to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Added,
    Removed,
    /// Invalid or out-of-bounds input, or nothing to remove.
    Ignored,
}

impl ToggleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ToggleAction::Added => "added",
            ToggleAction::Removed => "removed",
            ToggleAction::Ignored => "ignored",
        }
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The calendar changed in memory but could not be written to the store.
#[derive(Debug)]
pub struct SaveWarning {
    pub error: SlotError,
}

impl fmt::Display for SaveWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Availability not saved: {}", self.error)
    }
}

/// Result of a mutation: its value, plus a warning if persisting failed.
#[derive(Debug)]
#[must_use]
pub struct Applied<T> {
    pub value: T,
    pub warning: Option<SaveWarning>,
}

impl<T> Applied<T> {
    fn untouched(value: T) -> Self {
        Applied {
            value,
            warning: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }
}

pub struct AvailabilityEngine<S: AvailabilityStore> {
    calendar: WeekdayCalendar,
    store: S,
    bounds: SlotBounds,
}

impl<S: AvailabilityStore> AvailabilityEngine<S> {
    /// Build an engine from whatever `store` last saved.
    ///
    /// Missing, unreadable or malformed data all start from an empty calendar.
    pub fn load(store: S, bounds: SlotBounds) -> Self {
        let calendar = match store.load() {
            Ok(Some(raw)) => WeekdayCalendar::normalize(&raw),
            Ok(None) => WeekdayCalendar::empty(),
            Err(e) => {
                tracing::warn!("Could not load availability, starting empty: {}", e);
                WeekdayCalendar::empty()
            }
        };

        tracing::info!("Loaded availability with {} slots", calendar.total_slots());

        AvailabilityEngine {
            calendar,
            store,
            bounds,
        }
    }

    pub fn calendar(&self) -> &WeekdayCalendar {
        &self.calendar
    }

    pub fn bounds(&self) -> &SlotBounds {
        &self.bounds
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add `time` to `day` if absent, remove it otherwise.
    pub fn toggle_slot(&mut self, day: WeekdayKey, time: &str) -> Applied<ToggleAction> {
        let Some(slot) = self.bounds.accept(time) else {
            tracing::debug!("Ignoring toggle of invalid slot '{}' on {}", time, day);
            return Applied::untouched(ToggleAction::Ignored);
        };

        let slots = self.calendar.slots_mut(day);
        let action = if slots.remove(&slot) {
            ToggleAction::Removed
        } else {
            slots.insert(slot.clone());
            ToggleAction::Added
        };

        tracing::debug!("Toggled {} {}: {}", day, slot, action);
        self.persist(action)
    }

    /// Remove `time` from `day`, doing nothing if it is already absent.
    ///
    /// Bounds only restrict adding: a stored slot outside the current bounds
    /// can still be removed.
    pub fn remove_occurrence(&mut self, day: WeekdayKey, time: &str) -> Applied<ToggleAction> {
        let removed = TimeSlot::parse(time)
            .map(|slot| self.calendar.slots_mut(day).remove(&slot))
            .unwrap_or(false);

        if !removed {
            tracing::debug!("Nothing to remove at {} {}", day, time);
            return Applied::untouched(ToggleAction::Ignored);
        }

        tracing::debug!("Removed {} {}", day, time);
        self.persist(ToggleAction::Removed)
    }

    pub fn clear_all(&mut self) -> Applied<()> {
        self.calendar.clear();
        tracing::debug!("Cleared all availability");
        self.persist(())
    }

    /// Set Monday to Friday to exactly `template_slots` and clear the weekend.
    ///
    /// Labels that are invalid or outside the engine's bounds are dropped.
    pub fn apply_weekday_template<I, T>(&mut self, template_slots: I) -> Applied<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let slots = template_slots
            .into_iter()
            .filter_map(|label| self.bounds.accept(label.as_ref()))
            .collect();

        self.apply_template(&Template::weekdays(slots))
    }

    /// Replace the slots of every day `template` covers.
    pub fn apply_template(&mut self, template: &Template) -> Applied<()> {
        let slots: BTreeSet<TimeSlot> = template
            .slots
            .iter()
            .filter(|slot| self.bounds.contains(slot))
            .cloned()
            .collect();

        for day in WeekdayKey::ALL {
            if template.covers(day) {
                self.calendar.set_day(day, slots.clone());
            } else if template.clear_others {
                self.calendar.set_day(day, BTreeSet::new());
            }
        }

        tracing::debug!(
            "Applied template of {} slots to {} days",
            slots.len(),
            template.days.len()
        );
        self.persist(())
    }

    /// Next occurrence of every slot, counting from `reference`.
    pub fn occurrences(&self, reference: NaiveDate) -> impl Iterator<Item = Occurrence> + Clone + '_ {
        projector::project(&self.calendar, reference)
    }

    fn persist<T>(&self, value: T) -> Applied<T> {
        let warning = match self.store.save(&self.calendar) {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!("Failed to save availability: {}", error);
                Some(SaveWarning { error })
            }
        };

        Applied { value, warning }
    }
}
