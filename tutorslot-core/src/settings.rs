//! Global tutorslot configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::store::FileStore;
use crate::template::Template;
use crate::time_slot::{SlotBounds, TimeSlot};

static DEFAULT_DATA_DIR: &str = "~/.local/share/tutorslot";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_weekday_template() -> Vec<TimeSlot> {
    TimeSlot::hourly(9, 15)
}

fn default_earliest_slot() -> TimeSlot {
    SlotBounds::default().earliest
}

fn default_latest_slot() -> TimeSlot {
    SlotBounds::default().latest
}

/// Configuration at ~/.config/tutorslot/config.toml
///
/// Values can be overridden with `TUTORSLOT_*` environment variables,
/// e.g. `TUTORSLOT_DATA_DIR=/tmp/availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Slots set on Monday to Friday by the weekday template.
    #[serde(default = "default_weekday_template")]
    pub weekday_template: Vec<TimeSlot>,

    #[serde(default = "default_earliest_slot")]
    pub earliest_slot: TimeSlot,

    #[serde(default = "default_latest_slot")]
    pub latest_slot: TimeSlot,

    /// Additional named templates.
    #[serde(default)]
    pub templates: BTreeMap<String, Template>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: default_data_dir(),
            weekday_template: default_weekday_template(),
            earliest_slot: default_earliest_slot(),
            latest_slot: default_latest_slot(),
            templates: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn config_path() -> SlotResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SlotError::Config("Could not determine config directory".into()))?
            .join("tutorslot");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the default config path, creating it on first run.
    pub fn load() -> SlotResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> SlotResult<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("TUTORSLOT"))
            .build()
            .map_err(|e| SlotError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SlotError::Config(e.to_string()))?;

        settings.bounds()?;
        Ok(settings)
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    pub fn bounds(&self) -> SlotResult<SlotBounds> {
        SlotBounds::new(self.earliest_slot.clone(), self.latest_slot.clone())
    }

    /// Look up a template by name. `weekdays` is always available.
    pub fn template(&self, name: &str) -> Option<Template> {
        if let Some(template) = self.templates.get(name) {
            return Some(template.clone());
        }
        (name == "weekdays").then(|| Template::weekdays(self.weekday_template.clone()))
    }

    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.keys().cloned().collect();
        if !self.templates.contains_key("weekdays") {
            names.insert(0, "weekdays".to_string());
        }
        names
    }

    pub fn to_toml(&self) -> SlotResult<String> {
        toml::to_string_pretty(self).map_err(|e| SlotError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SlotResult<()> {
        let contents = format!(
            "\
# tutorslot configuration

# Where availability is stored:
# data_dir = \"{}\"

# Slots applied to Monday-Friday by `tutorslot template`:
# weekday_template = [\"09:00\", \"10:00\", \"11:00\", \"12:00\", \"13:00\", \"14:00\", \"15:00\"]

# Range of slots that can be toggled:
# earliest_slot = \"00:00\"
# latest_slot = \"23:30\"

# Named templates:
# [templates.weekend-mornings]
# days = [\"saturday\", \"sunday\"]
# slots = [\"09:00\", \"10:00\", \"11:00\"]
# clear_others = false
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SlotError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SlotError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::WeekdayKey;

    #[test]
    fn test_default_config_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tutorslot/config.toml");

        Settings::create_default_config(&path).unwrap();
        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        let template: Vec<&str> = settings.weekday_template.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            template,
            vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00"]
        );
        assert_eq!(settings.bounds().unwrap(), SlotBounds::default());
    }

    #[test]
    fn test_load_named_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "/srv/tutorslot"
weekday_template = ["16:00", "17:00"]
earliest_slot = "08:00"
latest_slot = "20:00"

[templates.weekend-mornings]
days = ["saturday", "sunday"]
slots = ["09:00", "10:00"]
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.data_path(), PathBuf::from("/srv/tutorslot"));

        let weekend = settings.template("weekend-mornings").unwrap();
        assert_eq!(weekend.days, vec![WeekdayKey::Saturday, WeekdayKey::Sunday]);
        assert!(!weekend.clear_others);

        let weekdays = settings.template("weekdays").unwrap();
        assert_eq!(weekdays.days, WeekdayKey::WORKDAYS.to_vec());
        assert_eq!(weekdays.slots.len(), 2);

        assert!(settings.template("holidays").is_none());
        assert_eq!(settings.template_names(), vec!["weekdays", "weekend-mornings"]);
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "earliest_slot = \"20:00\"\nlatest_slot = \"08:00\"\n").unwrap();

        assert!(matches!(Settings::load_from(&path), Err(SlotError::Config(_))));
    }

    #[test]
    fn test_to_toml_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, Settings::default().to_toml().unwrap()).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.weekday_template, Settings::default().weekday_template);
    }
}
