use thiserror::Error;

/// A single rejected input. Record-level validation is skip-and-continue:
/// callers collect these instead of aborting the whole aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Record {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Record {index}: unknown working status '{value}'")]
    UnknownWorkingStatus { index: usize, value: String },

    #[error("Negative RH quota {total_rh}")]
    NegativeQuota { total_rh: i64 },

    #[error("RH quota {total_rh} exceeds the days in a year")]
    QuotaTooLarge { total_rh: i64 },

    #[error("RH seed {index} ('{city}'): {source}")]
    InvalidSeed {
        index: usize,
        city: String,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("Duplicate RH seed for '{city}' in {year}")]
    DuplicateSeed { city: String, year: i32 },

    #[error("Invalid month index {0}: expected 1..=12")]
    InvalidMonth(u32),
}

#[derive(Error, Debug)]
pub enum HrError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HrResult<T> = Result<T, HrError>;
