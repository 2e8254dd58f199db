mod commands;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tutorslot_core::settings::Settings;
use tutorslot_core::store::FileStore;
use tutorslot_core::{AvailabilityEngine, WeekdayKey};

#[derive(Parser)]
#[command(name = "tutorslot")]
#[command(about = "Manage your weekly tutoring availability")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the weekly availability grid
    Show,
    /// Add a slot, or remove it if already set
    Toggle {
        /// Weekday (e.g. "monday" or "mon")
        day: WeekdayKey,
        /// Slot start, HH:00 or HH:30
        time: String,
    },
    /// Remove a slot (does nothing if it isn't set)
    Remove {
        day: WeekdayKey,
        time: String,
    },
    /// Remove all availability
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Apply a template (default: "weekdays")
    Template {
        name: Option<String>,

        /// List available templates instead of applying one
        #[arg(short, long)]
        list: bool,
    },
    /// List upcoming bookable slots
    Upcoming {
        /// First day to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Number of days to show
        #[arg(
            short,
            long,
            default_value_t = 7,
            value_parser = clap::value_parser!(u32).range(1..=commands::upcoming::MAX_DAYS as i64)
        )]
        days: u32,
    },
    /// Export availability as an .ics calendar
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Event title
        #[arg(long, default_value = "Available for tutoring")]
        summary: String,

        /// Stop each event after this many weeks (repeats forever if unset)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=520))]
        weeks: Option<u32>,
    },
    /// Show config paths and effective settings
    Config,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::load()?;

    match cli.command {
        Commands::Show => commands::show::run(open_engine(&settings)?),
        Commands::Toggle { day, time } => commands::toggle::run(open_engine(&settings)?, day, &time),
        Commands::Remove { day, time } => commands::remove::run(open_engine(&settings)?, day, &time),
        Commands::Clear { force } => commands::clear::run(open_engine(&settings)?, force),
        Commands::Template { name, list } => {
            if list {
                commands::template::list(&settings)
            } else {
                let name = name.as_deref().unwrap_or("weekdays");
                commands::template::run(open_engine(&settings)?, &settings, name)
            }
        }
        Commands::Upcoming { from, days } => {
            commands::upcoming::run(open_engine(&settings)?, from, days)
        }
        Commands::Export {
            output,
            summary,
            weeks,
        } => commands::export::run(open_engine(&settings)?, output, &summary, weeks),
        Commands::Config => commands::config::run(&settings),
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_engine(settings: &Settings) -> Result<AvailabilityEngine<FileStore>> {
    let bounds = settings.bounds()?;
    let store = settings.store();
    tracing::debug!("Using availability store at {}", store.path().display());
    Ok(AvailabilityEngine::load(store, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upcoming_days_is_bounded() {
        assert!(Cli::try_parse_from(["tutorslot", "upcoming", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["tutorslot", "upcoming", "--days", "4294967295"]).is_err());

        let cli = Cli::try_parse_from(["tutorslot", "upcoming", "--days", "14"]).unwrap();
        assert!(matches!(cli.command, Commands::Upcoming { days: 14, .. }));
    }

    #[test]
    fn test_export_weeks_is_optional() {
        let cli = Cli::try_parse_from(["tutorslot", "export"]).unwrap();
        assert!(matches!(cli.command, Commands::Export { weeks: None, .. }));

        let cli = Cli::try_parse_from(["tutorslot", "export", "--weeks", "4"]).unwrap();
        assert!(matches!(cli.command, Commands::Export { weeks: Some(4), .. }));

        assert!(Cli::try_parse_from(["tutorslot", "export", "--weeks", "0"]).is_err());
    }
}
