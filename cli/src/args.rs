//! Command-line arguments

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "growth-calc", bin_name = "growth-calc")]
#[command(about = "Childhood height and weight percentiles from LMS reference tables")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global_options: GlobalOptions,
}

#[derive(Debug, Args)]
pub struct GlobalOptions {
    #[arg(global = true, long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(global = true, long, short = 'f', value_enum, help = "Output format")]
    pub format: Option<OutputFormat>,

    #[arg(
        global = true,
        long,
        help = "Treat blank or non-numeric values as 0 instead of rejecting them"
    )]
    pub lenient: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate percentiles for one child
    Single(SingleArgs),
    /// Calculate percentiles for every row of a CSV file
    Batch(BatchArgs),
    /// Print a reference percentile curve
    Curve(CurveArgs),
}

#[derive(Debug, Args)]
pub struct SingleArgs {
    #[arg(long, help = "Age value, in --age-unit")]
    pub age: String,

    #[arg(long, help = "years or months")]
    pub age_unit: Option<String>,

    #[arg(long, help = "male or female")]
    pub sex: String,

    #[arg(long, help = "Height in cm (metric) or inches (imperial)")]
    pub height: String,

    #[arg(long, help = "Weight in kg (metric) or pounds (imperial)")]
    pub weight: String,

    #[arg(long, help = "metric or imperial")]
    pub units: Option<String>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV file with columns age,age_unit,sex,height,weight,units ("-" for stdin)
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct CurveArgs {
    #[arg(long, help = "male or female")]
    pub sex: String,

    #[arg(long, default_value = "height", help = "height or weight")]
    pub metric: String,

    #[arg(long, default_value_t = 50, help = "One of 3, 10, 25, 50, 75, 90, 97")]
    pub percentile: u8,
}
