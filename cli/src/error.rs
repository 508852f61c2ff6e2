//! CLI error handling

use growth_calc_shared::GrowthError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Growth(#[from] GrowthError),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("No chart line for percentile {0} (expected 3, 10, 25, 50, 75, 90 or 97)")]
    UnsupportedPercentile(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Offending measurement field, if the error concerns one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CliError::Growth(err) => err.field().map(|f| f.name()),
            _ => None,
        }
    }

    /// Message suitable for an output record
    pub fn user_message(&self) -> String {
        match self {
            CliError::Growth(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
