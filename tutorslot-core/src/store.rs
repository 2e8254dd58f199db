//! Durable storage for the availability calendar.
//!
//! Stores are passive: they hand out whatever they last saved and accept full
//! snapshots. The last write wins.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::calendar::WeekdayCalendar;
use crate::error::{SlotError, SlotResult};

/// Fixed identifier the availability document is stored under.
pub const STORAGE_KEY: &str = "tutor_availability";

pub trait AvailabilityStore {
    /// Raw, unvalidated data from the last save, if there was one.
    fn load(&self) -> SlotResult<Option<Value>>;

    fn save(&self, calendar: &WeekdayCalendar) -> SlotResult<()>;
}

impl<S: AvailabilityStore + ?Sized> AvailabilityStore for &S {
    fn load(&self) -> SlotResult<Option<Value>> {
        (**self).load()
    }

    fn save(&self, calendar: &WeekdayCalendar) -> SlotResult<()> {
        (**self).save(calendar)
    }
}

impl<S: AvailabilityStore + ?Sized> AvailabilityStore for Box<S> {
    fn load(&self) -> SlotResult<Option<Value>> {
        (**self).load()
    }

    fn save(&self, calendar: &WeekdayCalendar) -> SlotResult<()> {
        (**self).save(calendar)
    }
}

/// JSON document at `<dir>/tutor_availability.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }
}

impl AvailabilityStore for FileStore {
    fn load(&self) -> SlotResult<Option<Value>> {
        let path = self.path();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable availability file {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, calendar: &WeekdayCalendar) -> SlotResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path();
        let temp = self.dir.join(format!("{STORAGE_KEY}.json.tmp"));

        let content = serde_json::to_string_pretty(calendar)
            .map_err(|e| SlotError::Serialization(e.to_string()))?;

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process store, for embedding and tests.
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously saved (possibly malformed) data.
    pub fn with_value(value: Value) -> Self {
        MemoryStore {
            value: Mutex::new(Some(value)),
        }
    }

    /// The last snapshot saved, as stored.
    pub fn snapshot(&self) -> Option<Value> {
        self.value.lock().ok().and_then(|guard| guard.clone())
    }
}

impl AvailabilityStore for MemoryStore {
    fn load(&self) -> SlotResult<Option<Value>> {
        let guard = self
            .value
            .lock()
            .map_err(|_| SlotError::Storage("memory store lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, calendar: &WeekdayCalendar) -> SlotResult<()> {
        let value =
            serde_json::to_value(calendar).map_err(|e| SlotError::Serialization(e.to_string()))?;
        let mut guard = self
            .value
            .lock()
            .map_err(|_| SlotError::Storage("memory store lock poisoned".into()))?;
        *guard = Some(value);
        Ok(())
    }
}
