use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tutorslot_core::AvailabilityEngine;
use tutorslot_core::store::FileStore;

pub fn run(mut engine: AvailabilityEngine<FileStore>, force: bool) -> Result<()> {
    let total = engine.calendar().total_slots();

    if total == 0 {
        println!("{}", "Nothing to clear".dimmed());
        return Ok(());
    }

    // Confirm unless --force
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove {} weekly {}?",
                total,
                if total == 1 { "slot" } else { "slots" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let applied = engine.clear_all();
    println!("Cleared {} {}", total, if total == 1 { "slot" } else { "slots" });

    if let Some(warning) = applied.warning {
        println!("{}", warning.to_string().yellow());
    }

    Ok(())
}
