use anyhow::Result;
use owo_colors::OwoColorize;
use tutorslot_core::AvailabilityEngine;
use tutorslot_core::settings::Settings;
use tutorslot_core::store::FileStore;

use crate::render::Render;

pub fn run(mut engine: AvailabilityEngine<FileStore>, settings: &Settings, name: &str) -> Result<()> {
    let Some(template) = settings.template(name) else {
        anyhow::bail!(
            "Template '{}' not found. Available: {}",
            name,
            settings.template_names().join(", ")
        );
    };

    let applied = engine.apply_template(&template);

    println!("Applied template {}", name.bold());
    println!();
    println!("{}", engine.calendar().render());

    if let Some(warning) = applied.warning {
        println!("\n{}", warning.to_string().yellow());
    }

    Ok(())
}

pub fn list(settings: &Settings) -> Result<()> {
    for name in settings.template_names() {
        let Some(template) = settings.template(&name) else {
            continue;
        };

        let days: Vec<&str> = template.days.iter().map(|d| d.as_str()).collect();
        let slots: Vec<&str> = template.slots.iter().map(|s| s.as_str()).collect();

        println!("{}", name.bold());
        println!("  {} {}", "days: ".dimmed(), days.join(", "));
        println!("  {} {}", "slots:".dimmed(), slots.join(" "));
    }

    Ok(())
}
