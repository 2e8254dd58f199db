use anyhow::Result;
use owo_colors::OwoColorize;
use tutorslot_core::AvailabilityEngine;
use tutorslot_core::store::FileStore;

use crate::render::Render;

pub fn run(engine: AvailabilityEngine<FileStore>) -> Result<()> {
    let calendar = engine.calendar();

    println!("{}", calendar.render());

    if !calendar.is_empty() {
        println!();
        println!(
            "{}",
            format!("{} weekly slots", calendar.total_slots()).dimmed()
        );
    }

    Ok(())
}
