//! Error types for tutorslot.

use thiserror::Error;

/// Errors that can occur in tutorslot operations.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid time slot '{0}'. Expected HH:00 or HH:30")]
    InvalidTimeSlot(String),

    #[error("Invalid weekday '{0}'")]
    InvalidWeekday(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),
}

/// Result type alias for tutorslot operations.
pub type SlotResult<T> = Result<T, SlotError>;
