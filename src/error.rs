//! Error types for loading and summarising a survey day.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving, reading, or reporting on a survey file.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// No data file exists for the requested survey.
    #[error("survey file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// A row could not be decoded into an observation. The whole pass is abandoned.
    #[error("malformed record on line {line}: field '{field}': {reason}")]
    MalformedRecord {
        line: u64,
        field: String,
        reason: String,
    },

    /// There is nothing to chart for this survey.
    #[error("survey contains no observations at the tracked junctions")]
    EmptyInput,

    /// A single date component was outside its accepted bounds.
    #[error("{component} out of range - values must be between {min} and {max}")]
    OutOfRange {
        component: &'static str,
        min: u32,
        max: u32,
    },

    /// The components were individually valid but do not form a calendar date.
    #[error("invalid date {day:02}-{month:02}-{year}")]
    InvalidDate { day: u32, month: u32, year: i32 },

    /// A survey identifier string could not be split into day, month and year.
    #[error("invalid survey identifier '{0}', expected DD-MM-YYYY")]
    InvalidIdentifier(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart rendering failed: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SurveyError {
    /// True for failures the interactive loop answers by asking for another date.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SurveyError::NotFound { .. })
    }
}
