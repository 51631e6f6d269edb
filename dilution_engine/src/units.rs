//! Volume units and numeric coercion.
//!
//! Everything the engine computes is in millilitres.  This module
//! converts the four supported input units into that canonical unit and
//! turns raw form text into numbers.

use crate::error::UnitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millilitres per litre
pub const ML_PER_LITRE: f64 = 1000.0;
/// Millilitres per US fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735295625;
/// Millilitres per US gallon
pub const ML_PER_US_GALLON: f64 = 3785.411784;

/// A volume unit accepted for bottle and mix sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[default]
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "floz")]
    FluidOunce,
    #[serde(rename = "gal")]
    USGallon,
}

impl VolumeUnit {
    /// Conversion factor from this unit to millilitres.
    pub fn ml_factor(self) -> f64 {
        match self {
            VolumeUnit::Millilitre => 1.0,
            VolumeUnit::Litre => ML_PER_LITRE,
            VolumeUnit::FluidOunce => ML_PER_FL_OZ,
            VolumeUnit::USGallon => ML_PER_US_GALLON,
        }
    }

    pub fn to_millilitres(self, value: f64) -> f64 {
        value * self.ml_factor()
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            VolumeUnit::Millilitre => "mL",
            VolumeUnit::Litre => "L",
            VolumeUnit::FluidOunce => "fl oz",
            VolumeUnit::USGallon => "gal",
        };
        f.write_str(symbol)
    }
}

impl FromStr for VolumeUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "ml" | "millilitre" | "millilitres" | "milliliter" | "milliliters" => {
                Ok(VolumeUnit::Millilitre)
            }
            "l" | "litre" | "litres" | "liter" | "liters" => Ok(VolumeUnit::Litre),
            "floz" | "fl oz" | "fl. oz" | "fl. oz." | "oz" | "fluid ounce" | "fluid ounces" => {
                Ok(VolumeUnit::FluidOunce)
            }
            "gal" | "gallon" | "gallons" | "us gal" => Ok(VolumeUnit::USGallon),
            _ => Err(UnitError(s.to_string())),
        }
    }
}

/// Convert `value` expressed in `unit` into millilitres.
///
/// Negative or non-finite values pass through the multiplication
/// untouched; rejecting them is the caller's job.
pub fn to_millilitres(value: f64, unit: VolumeUnit) -> f64 {
    unit.to_millilitres(value)
}

/// Read a raw form field as a number, falling back to `0.0`.
///
/// Accepts a comma as the decimal separator (`"29,99"`).  When the text
/// carries both separators the commas are taken as digit grouping
/// (`"1,234.5"`).  Empty, unparseable and non-finite text all read as
/// zero.
pub fn parse_numeric_or_zero(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let normalized = if trimmed.contains('.') {
        trimmed.replace(',', "")
    } else {
        trimmed.replace(',', ".")
    };
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
