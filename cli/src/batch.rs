//! Single and batch evaluation
//!
//! Batch input is CSV with headers `age,age_unit,sex,height,weight,units`.
//! The unit columns may be omitted or left blank, in which case the
//! configured defaults apply. A row that fails to parse or validate is
//! reported and the batch carries on.

use crate::config::CliConfig;
use crate::error::CliError;
use growth_calc_shared::{
    calculate_percentiles, AgeUnit, GrowthResult, ParseMode, PercentileResult, RawMeasurement,
    UnitSystem,
};
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::{info, warn};

/// How raw input is interpreted
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalOptions {
    pub mode: ParseMode,
    pub default_units: UnitSystem,
    pub default_age_unit: AgeUnit,
}

impl EvalOptions {
    pub fn from_config(config: &CliConfig) -> Self {
        Self {
            mode: config.parsing.mode(),
            default_units: config.defaults.units,
            default_age_unit: config.defaults.age_unit,
        }
    }
}

/// Fill blank unit fields from the defaults, parse, and calculate
pub fn evaluate(raw: &RawMeasurement, options: &EvalOptions) -> GrowthResult<PercentileResult> {
    let mut raw = raw.clone();
    if raw.age_unit.trim().is_empty() {
        raw.age_unit = options.default_age_unit.to_string();
    }
    if raw.units.trim().is_empty() {
        raw.units = options.default_units.to_string();
    }
    let measurement = raw.parse(options.mode)?;
    calculate_percentiles(&measurement)
}

/// One CSV input row
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub age: String,
    #[serde(default)]
    pub age_unit: Option<String>,
    pub sex: String,
    pub height: String,
    pub weight: String,
    #[serde(default)]
    pub units: Option<String>,
}

impl From<BatchRow> for RawMeasurement {
    fn from(row: BatchRow) -> Self {
        RawMeasurement {
            age_value: row.age,
            age_unit: row.age_unit.unwrap_or_default(),
            sex: row.sex,
            height: row.height,
            weight: row.weight,
            units: row.units.unwrap_or_default(),
        }
    }
}

/// Outcome of evaluating one input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RowReport {
    Ok {
        row: usize,
        #[serde(flatten)]
        result: PercentileResult,
        #[serde(rename = "heightLabel")]
        height_label: &'static str,
        #[serde(rename = "weightLabel")]
        weight_label: &'static str,
    },
    Failed {
        row: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<&'static str>,
        message: String,
    },
}

impl RowReport {
    pub fn from_result(row: usize, outcome: Result<PercentileResult, CliError>) -> Self {
        match outcome {
            Ok(result) => RowReport::Ok {
                row,
                height_label: result.height_band().description(),
                weight_label: result.weight_band().description(),
                result,
            },
            Err(err) => RowReport::Failed {
                row,
                field: err.field(),
                message: err.user_message(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RowReport::Ok { .. })
    }
}

/// Results of a batch run, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows: Vec<RowReport>,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_ok()).count()
    }
}

/// Evaluate every row of a CSV document
pub fn process_batch<R: Read>(input: R, options: &EvalOptions) -> Result<BatchReport, CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    // Fail fast on an unusable header; row-level problems are reported per row
    let headers = reader.headers()?.clone();
    for required in ["age", "sex", "height", "weight"] {
        if !headers.iter().any(|h| h == required) {
            return Err(CliError::MissingColumn(required));
        }
    }

    let mut report = BatchReport::default();
    for (index, record) in reader.deserialize::<BatchRow>().enumerate() {
        let row = index + 1;
        let outcome = record
            .map_err(CliError::from)
            .and_then(|r| evaluate(&RawMeasurement::from(r), options).map_err(CliError::from));

        if let Err(err) = &outcome {
            warn!(row, error = %err, "Row rejected");
        }
        report.rows.push(RowReport::from_result(row, outcome));
    }

    info!(
        rows = report.rows.len(),
        failures = report.failures(),
        "Batch complete"
    );
    Ok(report)
}
