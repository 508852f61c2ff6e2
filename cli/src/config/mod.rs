//! Configuration management for the growth calculator CLI
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config file (config/growth-calc.toml, or the --config path)
//! 3. Environment variables (prefix: GC__)

use anyhow::Result;
use growth_calc_shared::{AgeUnit, ParseMode, UnitSystem};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Config file read when no --config path is given
pub const DEFAULT_CONFIG_FILE: &str = "config/growth-calc.toml";

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Units assumed when an input leaves them blank
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub units: UnitSystem,
    pub age_unit: AgeUnit,
}

/// Numeric field parsing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Treat blank or non-numeric values as 0 instead of rejecting them
    pub lenient: bool,
}

impl ParsingConfig {
    pub fn mode(&self) -> ParseMode {
        if self.lenient {
            ParseMode::Lenient
        } else {
            ParseMode::Strict
        }
    }
}

/// Output rendering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document per line
    Json,
    /// Indented JSON
    #[default]
    Pretty,
    /// CSV with a header row
    Csv,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    pub level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "growth_calc=info,growth_calc_cli=info,growth_calc_shared=warn".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Filter built from `level`; the binary logs under the `growth_calc` target
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.level)
    }
}

/// Environment source: GC__ prefix, `__` between nested keys
fn environment() -> config::Environment {
    config::Environment::with_prefix("GC")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl CliConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. `path`, or config/growth-calc.toml if it exists
    /// 3. Environment variables with GC__ prefix
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&CliConfig::default())?)
            .add_source(file)
            // Override with environment variables (GC__ prefix)
            // e.g., GC__OUTPUT__FORMAT=csv sets output.format
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
