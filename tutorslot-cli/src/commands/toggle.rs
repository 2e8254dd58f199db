use anyhow::Result;
use chrono::Local;
use tutorslot_core::store::FileStore;
use tutorslot_core::view::AvailabilitySession;
use tutorslot_core::{AvailabilityEngine, WeekdayKey, projector};

use crate::render::{TerminalView, render_applied};

pub fn run(engine: AvailabilityEngine<FileStore>, day: WeekdayKey, time: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let date = projector::next_date_for_weekday(today, day);

    let mut session = AvailabilitySession::new(engine, TerminalView::new(), today);

    let applied = session.on_slot_selected(date, time);
    println!("{}", render_applied(&applied, day, time));
    println!();
    println!("{}", session.view().screen());

    Ok(())
}
