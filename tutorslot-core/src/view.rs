//! Glue between the engine and a calendar widget.
//!
//! The widget renders occurrences and reports two kinds of user input:
//! selecting an empty range (toggle that slot on) and clicking an existing
//! occurrence (remove it). [`AvailabilitySession`] turns those callbacks into
//! engine operations and re-renders after every change.

use chrono::NaiveDate;

use crate::engine::{Applied, AvailabilityEngine, ToggleAction};
use crate::projector::{self, Occurrence};
use crate::store::AvailabilityStore;
use crate::weekday::WeekdayKey;

/// A calendar widget occurrences are rendered into.
pub trait CalendarView {
    fn render_events(&mut self, occurrences: &[Occurrence]);
}

pub struct AvailabilitySession<S: AvailabilityStore, V: CalendarView> {
    engine: AvailabilityEngine<S>,
    view: V,
    reference: NaiveDate,
}

impl<S: AvailabilityStore, V: CalendarView> AvailabilitySession<S, V> {
    /// Wrap `engine` and render its occurrences from `reference` once.
    pub fn new(engine: AvailabilityEngine<S>, view: V, reference: NaiveDate) -> Self {
        let mut session = AvailabilitySession {
            engine,
            view,
            reference,
        };
        session.refresh();
        session
    }

    pub fn engine(&self) -> &AvailabilityEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AvailabilityEngine<S> {
        &mut self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    pub fn set_reference_date(&mut self, reference: NaiveDate) {
        self.reference = reference;
        self.refresh();
    }

    /// The user selected `time` on `date` in the widget.
    pub fn on_slot_selected(&mut self, date: NaiveDate, time: &str) -> Applied<ToggleAction> {
        let day = projector::weekday_from_date(date);
        let result = self.engine.toggle_slot(day, time);
        self.refresh_if_changed(result.value);
        result
    }

    /// The user clicked the existing occurrence at `day` / `time`.
    pub fn on_event_clicked(&mut self, day: WeekdayKey, time: &str) -> Applied<ToggleAction> {
        let result = self.engine.remove_occurrence(day, time);
        self.refresh_if_changed(result.value);
        result
    }

    /// Occurrences as currently rendered, sorted by start.
    pub fn visible_occurrences(&self) -> Vec<Occurrence> {
        let mut occurrences: Vec<Occurrence> = self.engine.occurrences(self.reference).collect();
        projector::sort_by_start(&mut occurrences);
        occurrences
    }

    /// Re-render the widget from the current calendar.
    pub fn refresh(&mut self) {
        let occurrences = self.visible_occurrences();
        self.view.render_events(&occurrences);
    }

    fn refresh_if_changed(&mut self, action: ToggleAction) {
        if action != ToggleAction::Ignored {
            self.refresh();
        }
    }
}
