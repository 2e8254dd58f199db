use anyhow::{Result, anyhow};
use chrono::{Days, Local, NaiveDate};
use tutorslot_core::store::FileStore;
use tutorslot_core::{AvailabilityEngine, projector};

use crate::render::render_occurrences;

/// Upper bound for `--days`.
pub const MAX_DAYS: u32 = 366;

pub fn run(engine: AvailabilityEngine<FileStore>, from: Option<NaiveDate>, days: u32) -> Result<()> {
    let today = Local::now().date_naive();
    let (from, to) = date_range(from.unwrap_or(today), days)?;
    let occurrences = projector::project_range(engine.calendar(), from, to);
    println!("{}", render_occurrences(&occurrences, today));
    Ok(())
}

/// Inclusive range covering `days` days starting at `from`.
fn date_range(from: NaiveDate, days: u32) -> Result<(NaiveDate, NaiveDate)> {
    let days = days.clamp(1, MAX_DAYS);
    let to = from
        .checked_add_days(Days::new(u64::from(days) - 1))
        .ok_or_else(|| anyhow!("{} days from {} is past the last supported date", days, from))?;
    Ok((from, to))
}
