//! Measurement input types
//!
//! [`RawMeasurement`] mirrors the calculator form (every field a string);
//! [`Measurement`] is the typed record the engine consumes.

use crate::errors::{GrowthError, GrowthResult, MeasurementField};
use crate::units::{AgeUnit, UnitSystem};
use crate::validation::{coerce_number, parse_number, validate_age_years, validate_height_cm, validate_weight_kg};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex, selecting the reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiologicalSex::Male => write!(f, "male"),
            BiologicalSex::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "boy" => Ok(BiologicalSex::Male),
            "female" | "f" | "girl" => Ok(BiologicalSex::Female),
            _ => Err(GrowthError::unknown("sex", s)),
        }
    }
}

/// One child's measurements as entered on the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub age_value: f64,
    #[serde(default)]
    pub age_unit: AgeUnit,
    pub sex: BiologicalSex,
    /// Height in cm (metric) or inches (imperial)
    pub height: f64,
    /// Weight in kg (metric) or pounds (imperial)
    pub weight: f64,
    #[serde(default)]
    pub units: UnitSystem,
}

/// A [`Measurement`] converted to years, cm and kg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricMeasurement {
    pub age_years: f64,
    pub sex: BiologicalSex,
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl Measurement {
    /// Convert to reference units without validating
    pub fn to_metric(&self) -> MetricMeasurement {
        let (height_cm, weight_kg) = self.units.to_metric(self.height, self.weight);
        MetricMeasurement {
            age_years: self.age_unit.to_years(self.age_value),
            sex: self.sex,
            height_cm,
            weight_kg,
        }
    }

    /// Convert to reference units, rejecting values the LMS math cannot use
    pub fn normalize(&self) -> GrowthResult<MetricMeasurement> {
        let metric = self.to_metric();
        validate_age_years(metric.age_years)?;
        validate_height_cm(metric.height_cm)?;
        validate_weight_kg(metric.weight_kg)?;
        Ok(metric)
    }
}

/// How numeric form fields are parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Blank or non-numeric input is an error
    #[default]
    Strict,
    /// Blank or non-numeric input becomes 0, as the legacy form behaved
    Lenient,
}

/// The calculator form's fields, unparsed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    pub age_value: String,
    pub age_unit: String,
    pub sex: String,
    pub height: String,
    pub weight: String,
    pub units: String,
}

impl RawMeasurement {
    /// Parse the form fields into a [`Measurement`]
    ///
    /// Blank unit fields fall back to years / metric. Sex must always be given.
    pub fn parse(&self, mode: ParseMode) -> GrowthResult<Measurement> {
        let number = |field: MeasurementField, raw: &str| match mode {
            ParseMode::Strict => parse_number(field, raw),
            ParseMode::Lenient => Ok(coerce_number(raw)),
        };

        Ok(Measurement {
            age_value: number(MeasurementField::Age, &self.age_value)?,
            age_unit: parse_or_default(&self.age_unit)?,
            sex: self.sex.parse()?,
            height: number(MeasurementField::Height, &self.height)?,
            weight: number(MeasurementField::Weight, &self.weight)?,
            units: parse_or_default(&self.units)?,
        })
    }
}

fn parse_or_default<T>(raw: &str) -> GrowthResult<T>
where
    T: std::str::FromStr<Err = GrowthError> + Default,
{
    if raw.trim().is_empty() {
        Ok(T::default())
    } else {
        raw.parse()
    }
}
