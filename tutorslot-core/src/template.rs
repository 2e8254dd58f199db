//! Bulk availability templates.

use serde::{Deserialize, Serialize};

use crate::time_slot::TimeSlot;
use crate::weekday::WeekdayKey;

/// A set of slots applied to several weekdays in one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub days: Vec<WeekdayKey>,
    pub slots: Vec<TimeSlot>,

    /// Empty every day not listed in `days`.
    #[serde(default)]
    pub clear_others: bool,
}

impl Template {
    /// Monday to Friday set to `slots`, weekend cleared.
    pub fn weekdays(slots: Vec<TimeSlot>) -> Self {
        Template {
            days: WeekdayKey::WORKDAYS.to_vec(),
            slots,
            clear_others: true,
        }
    }

    pub fn covers(&self, day: WeekdayKey) -> bool {
        self.days.contains(&day)
    }
}
