//! Growth Calculator CLI Library
//!
//! Command-line front end for the growth percentile engine: one-off
//! calculations, CSV batch runs and reference curve export. Exposed as a
//! library so the commands can be exercised from tests.

pub mod app;
pub mod args;
pub mod batch;
pub mod config;
pub mod error;
pub mod output;
