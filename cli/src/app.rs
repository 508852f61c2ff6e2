//! Command dispatch

use crate::args::{BatchArgs, Command, CurveArgs, SingleArgs};
use crate::batch::{evaluate, process_batch, BatchReport, EvalOptions, RowReport};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{write_curve, write_rows};
use anyhow::{Context, Result};
use growth_calc_shared::{chart_percentile_z, reference_curve_points, BiologicalSex, GrowthMetric, RawMeasurement};
use std::fs::File;
use std::io::{self, Read, Write};
use tracing::{debug, info};

/// Run one command, writing results to `out`
///
/// Returns the number of inputs that could not be evaluated.
pub fn run<W: Write>(command: Command, config: &CliConfig, out: W) -> Result<usize> {
    let options = EvalOptions::from_config(config);
    let format = config.output.format;

    match command {
        Command::Single(args) => {
            let report = run_single(&args, &options);
            let failures = usize::from(!report.is_ok());
            write_rows(out, format, &[report])?;
            Ok(failures)
        }
        Command::Batch(args) => {
            let report = run_batch(&args, &options)?;
            write_rows(out, format, &report.rows)?;
            Ok(report.failures())
        }
        Command::Curve(args) => {
            run_curve(&args, config, out)?;
            Ok(0)
        }
    }
}

fn run_single(args: &SingleArgs, options: &EvalOptions) -> RowReport {
    let raw = RawMeasurement {
        age_value: args.age.clone(),
        age_unit: args.age_unit.clone().unwrap_or_default(),
        sex: args.sex.clone(),
        height: args.height.clone(),
        weight: args.weight.clone(),
        units: args.units.clone().unwrap_or_default(),
    };
    debug!(?raw, "Evaluating single measurement");
    RowReport::from_result(1, evaluate(&raw, options).map_err(CliError::from))
}

fn run_batch(args: &BatchArgs, options: &EvalOptions) -> Result<BatchReport> {
    let input: Box<dyn Read> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open {}", args.input.display()))?;
        Box::new(io::BufReader::new(file))
    };

    info!(input = %args.input.display(), mode = ?options.mode, "Starting batch");
    let report = process_batch(input, options)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    Ok(report)
}

fn run_curve<W: Write>(args: &CurveArgs, config: &CliConfig, out: W) -> Result<()> {
    let sex: BiologicalSex = args.sex.parse().map_err(CliError::from)?;
    let metric: GrowthMetric = args.metric.parse().map_err(CliError::from)?;
    let z = chart_percentile_z(args.percentile).ok_or(CliError::UnsupportedPercentile(args.percentile))?;

    let points = reference_curve_points(metric, sex, z);
    debug!(%metric, %sex, percentile = args.percentile, points = points.len(), "Reference curve");
    write_curve(out, config.output.format, metric, &points)?;
    Ok(())
}
