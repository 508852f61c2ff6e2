//! Rendering of results
//!
//! JSON output writes one document per line, pretty output indents each
//! document, CSV output writes a header and one record per result.

use crate::batch::RowReport;
use crate::config::OutputFormat;
use crate::error::CliError;
use growth_calc_shared::{CurvePoint, GrowthMetric};
use serde::Serialize;
use std::io::Write;

/// Flat CSV shape of a [`RowReport`]; unused columns stay empty
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    row: usize,
    status: &'static str,
    height_percentile: Option<u8>,
    weight_percentile: Option<u8>,
    height_z: Option<f64>,
    weight_z: Option<f64>,
    reference_age: Option<f64>,
    height_label: Option<&'static str>,
    weight_label: Option<&'static str>,
    error_field: Option<&'static str>,
    error: Option<&'a str>,
}

impl<'a> From<&'a RowReport> for CsvRow<'a> {
    fn from(report: &'a RowReport) -> Self {
        match report {
            RowReport::Ok {
                row,
                result,
                height_label,
                weight_label,
            } => CsvRow {
                row: *row,
                status: "ok",
                height_percentile: Some(result.height_percentile),
                weight_percentile: Some(result.weight_percentile),
                height_z: Some(result.height_z),
                weight_z: Some(result.weight_z),
                reference_age: Some(result.reference_age),
                height_label: Some(*height_label),
                weight_label: Some(*weight_label),
                error_field: None,
                error: None,
            },
            RowReport::Failed {
                row,
                field,
                message,
            } => CsvRow {
                row: *row,
                status: "failed",
                height_percentile: None,
                weight_percentile: None,
                height_z: None,
                weight_z: None,
                reference_age: None,
                height_label: None,
                weight_label: None,
                error_field: *field,
                error: Some(message.as_str()),
            },
        }
    }
}

fn write_documents<W: Write, T: Serialize>(
    mut out: W,
    format: OutputFormat,
    items: &[T],
) -> Result<(), CliError> {
    for item in items {
        match format {
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut out, item),
            _ => serde_json::to_writer(&mut out, item),
        }
        .map_err(std::io::Error::from)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write result rows in the requested format
pub fn write_rows<W: Write>(out: W, format: OutputFormat, rows: &[RowReport]) -> Result<(), CliError> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in rows {
                writer.serialize(CsvRow::from(row))?;
            }
            writer.flush()?;
            Ok(())
        }
        _ => write_documents(out, format, rows),
    }
}

/// One point of a reference curve, tagged with the metric's unit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CurveRow {
    age_years: f64,
    value: f64,
    unit: &'static str,
}

/// Write a reference curve in the requested format
pub fn write_curve<W: Write>(
    out: W,
    format: OutputFormat,
    metric: GrowthMetric,
    points: &[CurvePoint],
) -> Result<(), CliError> {
    let unit = metric.reference_unit();
    let rows: Vec<CurveRow> = points
        .iter()
        .map(|p| CurveRow { age_years: p.age_years, value: p.value, unit })
        .collect();

    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            Ok(())
        }
        _ => write_documents(out, format, &rows),
    }
}
