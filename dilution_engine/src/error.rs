//! Error types for the Dilution Engine.
//!
//! The calculation core never fails outright; these types describe
//! *why* something was rejected so callers (validation, the HTTP API,
//! the CLI) can report it.  Application-level plumbing uses
//! [`anyhow`] on top of them.

use thiserror::Error;

/// Reasons a dilution expression could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DilutionError {
    #[error("dilution is empty")]
    Empty,
    #[error("could not read '{0}' as a ratio")]
    Unrecognised(String),
    #[error("concentrate part must be greater than zero")]
    NonPositiveConcentrate,
    #[error("water part cannot be negative")]
    NegativeWater,
    #[error("ratio does not produce a finite value")]
    NonFinite,
}

/// Raised when a unit name is not one of the supported volume units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown volume unit '{0}' (expected ml, l, floz or gal)")]
pub struct UnitError(pub String);

/// Problems with server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address '{addr}': {source}")]
    BindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
