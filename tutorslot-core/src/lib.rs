//! Core types for tutorslot.
//!
//! This crate holds a tutor's weekly recurring availability and everything
//! that operates on it:
//! - `WeekdayCalendar`, `WeekdayKey` and `TimeSlot` for the data model
//! - `AvailabilityEngine`, the only place availability is mutated
//! - `projector` for turning weekly slots into dated occurrences
//! - `store` for the persistence contract and its file-backed implementation

pub mod calendar;
pub mod engine;
pub mod error;
pub mod ics;
pub mod projector;
pub mod settings;
pub mod store;
pub mod template;
pub mod time_slot;
pub mod view;
pub mod weekday;

pub use calendar::WeekdayCalendar;
pub use engine::{Applied, AvailabilityEngine, SaveWarning, ToggleAction};
pub use error::{SlotError, SlotResult};
pub use projector::Occurrence;
pub use time_slot::{SlotBounds, TimeSlot};
pub use weekday::WeekdayKey;
