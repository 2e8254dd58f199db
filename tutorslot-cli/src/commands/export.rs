use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tutorslot_core::store::FileStore;
use tutorslot_core::{AvailabilityEngine, ics};

pub fn run(
    engine: AvailabilityEngine<FileStore>,
    output: Option<PathBuf>,
    summary: &str,
    weeks: Option<u32>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let content = ics::generate_ics(engine.calendar(), today, summary, weeks)?;

    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            eprintln!(
                "Exported {} weekly slots to {}",
                engine.calendar().total_slots(),
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}
