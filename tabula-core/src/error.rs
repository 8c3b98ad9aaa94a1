//! Error types for the timetable engine.

use thiserror::Error;

/// Failures while fetching the calendar export.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No calendar URL configured (set ics_url or TABULA_ICS_URL)")]
    MissingUrl,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Calendar download timed out after {0}s")]
    Timeout(u64),

    #[error("Calendar server answered HTTP {0}")]
    BadStatus(u16),

    #[error("Could not write calendar cache: {0}")]
    Cache(#[source] std::io::Error),
}

/// Failures while turning a calendar export into a timetable.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Calendar export is not valid UTF-8")]
    InvalidUtf8,

    #[error("Calendar export contains no events")]
    NoEvents,

    #[error("Calendar export contains events but none with a class name")]
    NoClasses,

    #[error("Timetable snapshot is unreadable: {0}")]
    Snapshot(String),
}

/// Errors that can occur in timetable operations.
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for timetable operations.
pub type TabulaResult<T> = Result<T, TabulaError>;
