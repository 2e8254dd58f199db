use anyhow::Result;
use owo_colors::OwoColorize;
use tutorslot_core::settings::Settings;

pub fn run(settings: &Settings) -> Result<()> {
    let config_path = Settings::config_path()?;
    let store = settings.store();

    println!("{}", "Paths".bold());
    println!("  Config:        {}", config_path.display());
    println!("  Availability:  {}", store.path().display());
    println!();
    println!("{}", "Settings".bold());
    print!("{}", settings.to_toml()?);

    Ok(())
}
