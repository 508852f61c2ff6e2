//! Growth Calculator Shared Library
//!
//! The childhood growth percentile engine: reference LMS tables, unit
//! conversion, input validation and z-score/percentile math. Used by the
//! WASM calculator widget and the command-line tool.
//!
//! All calculations are pure. Reference tables are compiled in and never
//! change at runtime, so every function here is safe to call from any thread.

pub mod errors;
pub mod growth;
pub mod lms;
pub mod measurement;
pub mod reference;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use growth::*;
pub use lms::{approximate_normal_cdf, chart_percentile_z, value_at_z, z_score, z_score_to_percentile};
pub use measurement::*;
pub use reference::{closest_reference, reference_table, GrowthMetric, LmsParams, ReferenceEntry, ReferenceTable};
pub use units::*;
