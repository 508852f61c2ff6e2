//! Error types for the growth calculator

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Numeric input field of a [`Measurement`](crate::Measurement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementField {
    Age,
    Height,
    Weight,
}

impl MeasurementField {
    /// Field name as used by the form layer
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementField::Age => "age",
            MeasurementField::Height => "height",
            MeasurementField::Weight => "weight",
        }
    }

    /// User-friendly label for error messages
    pub fn display_label(&self) -> &'static str {
        match self {
            MeasurementField::Age => "Child's Age",
            MeasurementField::Height => "Height",
            MeasurementField::Weight => "Weight",
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Growth calculation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrowthError {
    #[error("Invalid measurement: {field} {reason}")]
    InvalidMeasurement {
        field: MeasurementField,
        reason: String,
    },

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

impl GrowthError {
    pub fn invalid(field: MeasurementField, reason: impl Into<String>) -> Self {
        GrowthError::InvalidMeasurement {
            field,
            reason: reason.into(),
        }
    }

    pub fn unknown(kind: &'static str, value: &str) -> Self {
        GrowthError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }

    /// The offending numeric field, if any
    pub fn field(&self) -> Option<MeasurementField> {
        match self {
            GrowthError::InvalidMeasurement { field, .. } => Some(*field),
            GrowthError::UnknownValue { .. } => None,
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            GrowthError::InvalidMeasurement { field, reason } => {
                format!("{}: {}", field.display_label(), reason)
            }
            GrowthError::UnknownValue { kind, value } => {
                format!("\"{}\" is not a valid {}", value, kind)
            }
        }
    }
}

/// Result type alias for growth calculations
pub type GrowthResult<T> = Result<T, GrowthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_measurement_message() {
        let err = GrowthError::invalid(MeasurementField::Height, "must be greater than 0");
        assert_eq!(err.to_string(), "Invalid measurement: height must be greater than 0");
        assert_eq!(err.user_message(), "Height: must be greater than 0");
        assert_eq!(err.field(), Some(MeasurementField::Height));
    }

    #[test]
    fn test_unknown_value_message() {
        let err = GrowthError::unknown("sex", "other");
        assert_eq!(err.to_string(), "Unknown sex: other");
        assert_eq!(err.user_message(), "\"other\" is not a valid sex");
        assert_eq!(err.field(), None);
    }
}
