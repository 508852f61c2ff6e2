//! Growth percentile calculation
//!
//! Converts a [`Measurement`] to reference units, picks the nearest age band
//! of each reference table, and reports LMS z-scores with their percentiles.

use crate::errors::GrowthResult;
use crate::lms::{value_at_z, z_score, z_score_to_percentile};
use crate::measurement::{BiologicalSex, Measurement};
use crate::reference::{reference_table, GrowthMetric};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of a growth percentile calculation
///
/// `reference_age` is the tabulated age used for lookup, not the child's
/// exact age. Between table keys the two can differ by up to half a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileResult {
    pub height_percentile: u8,
    pub weight_percentile: u8,
    pub height_z: f64,
    pub weight_z: f64,
    pub reference_age: f64,
}

impl PercentileResult {
    pub fn height_band(&self) -> PercentileBand {
        PercentileBand::classify(self.height_percentile)
    }

    pub fn weight_band(&self) -> PercentileBand {
        PercentileBand::classify(self.weight_percentile)
    }
}

/// Interpretive label shown next to a percentile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileBand {
    BelowAverage,
    Average,
    AboveAverage,
}

impl PercentileBand {
    /// Below 15 is below average, above 85 is above average
    pub fn classify(percentile: u8) -> Self {
        if percentile < 15 {
            PercentileBand::BelowAverage
        } else if percentile <= 85 {
            PercentileBand::Average
        } else {
            PercentileBand::AboveAverage
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PercentileBand::BelowAverage => "Below average",
            PercentileBand::Average => "Average",
            PercentileBand::AboveAverage => "Above average",
        }
    }
}

/// Calculate height and weight percentiles for one child
///
/// Inputs are validated once, after unit conversion. A negative age, a
/// non-positive height or weight, or any non-finite value is rejected with
/// [`GrowthError::InvalidMeasurement`](crate::GrowthError::InvalidMeasurement).
pub fn calculate_percentiles(measurement: &Measurement) -> GrowthResult<PercentileResult> {
    let metric = measurement.normalize().map_err(|err| {
        warn!(error = %err, "Rejected growth measurement");
        err
    })?;

    let height_ref = reference_table(GrowthMetric::Height, metric.sex).closest(metric.age_years);
    let weight_ref = reference_table(GrowthMetric::Weight, metric.sex).closest(metric.age_years);

    let height_z = z_score(metric.height_cm, &height_ref.lms);
    let weight_z = z_score(metric.weight_kg, &weight_ref.lms);

    debug!(
        sex = %metric.sex,
        age_years = metric.age_years,
        reference_age = height_ref.age_years,
        height_cm = metric.height_cm,
        weight_kg = metric.weight_kg,
        height_z,
        weight_z,
        "Calculated growth z-scores"
    );

    Ok(PercentileResult {
        height_percentile: z_score_to_percentile(height_z),
        weight_percentile: z_score_to_percentile(weight_z),
        height_z,
        weight_z,
        reference_age: height_ref.age_years,
    })
}

/// A point on a reference percentile curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub age_years: f64,
    /// In cm for height, kg for weight
    pub value: f64,
}

/// Evaluate the measurement at z-score `z` for every age band of a table
pub fn reference_curve_points(metric: GrowthMetric, sex: BiologicalSex, z: f64) -> Vec<CurvePoint> {
    reference_table(metric, sex)
        .entries()
        .iter()
        .map(|entry| CurvePoint {
            age_years: entry.age_years,
            value: value_at_z(z, &entry.lms),
        })
        .collect()
}
