//! Dilution Engine library crate.
//!
//! This crate exposes the dilution ratio parser and the cost/yield
//! engine as reusable modules.  Front ends may depend on the
//! `dilution_engine` crate and call [`parse_dilution`] and [`compute`]
//! directly, or talk to the HTTP API built by `api::router`.

pub mod api;
pub mod config;
pub mod dilution;
pub mod engine;
pub mod error;
pub mod models;
pub mod units;
pub mod validation;

pub use dilution::{parse_dilution, trim_trailing_zeros, try_parse_dilution, Ratio};
pub use engine::{compute, compute_batch, finite_or_zero};
pub use error::{ConfigError, DilutionError, UnitError};
pub use models::{CalculationInput, CalculationReport, CalculationResult, InputIssue, IssueKind};
pub use units::{parse_numeric_or_zero, to_millilitres, VolumeUnit};
pub use validation::validate;
