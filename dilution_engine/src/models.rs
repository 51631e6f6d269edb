//! Data models for the Dilution Engine.
//!
//! The `models` module defines the serialisable input and output
//! structures exchanged with the front ends.  Inputs arrive exactly as
//! the user typed them (numeric fields are strings); outputs are raw
//! numbers, leaving currency and rounding to the presentation layer.

use crate::dilution::Ratio;
use crate::units::VolumeUnit;
use serde::{Deserialize, Serialize};

/// Raw parameters for one calculation, as entered in the form.
///
/// Every numeric field is text.  Missing or unparseable values count as
/// zero; see [`crate::units::parse_numeric_or_zero`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationInput {
    /// Size of the concentrate bottle.
    pub bottle_size: String,
    pub bottle_unit: VolumeUnit,
    /// Price paid for the concentrate bottle.
    pub bottle_cost: String,
    /// Free-text dilution, e.g. `"1:16"` or `"16x"`.
    pub dilution: String,
    /// Size of the mixing bottle filled per use.
    pub mix_size: String,
    pub mix_unit: VolumeUnit,
    /// Volume dispensed by one pump, in millilitres.
    pub pump_ml: String,
    /// Size of the conditioner bottle.
    pub cond_bottle_size: String,
    pub cond_bottle_unit: VolumeUnit,
    /// Price paid for the conditioner bottle.
    pub cond_bottle_cost: String,
    /// Conditioner used per bath, in millilitres.
    pub cond_use_per_bath_ml: String,
}

/// Every quantity derived from a [`CalculationInput`].
///
/// Volumes are millilitres and costs are in the input currency.  All
/// fields are finite; anything that cannot be computed is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// The ratio the dilution text was read as.
    pub ratio: Ratio,
    pub yield_from_bottle: f64,
    pub cost_per_ml_concentrate: f64,
    pub cost_per_ml_mixed: f64,
    pub cost_per_mixed_litre: f64,
    #[serde(rename = "costPer100ml")]
    pub cost_per_100ml: f64,
    pub cost_per_mix_bottle: f64,
    pub mixes_per_bottle: f64,
    pub concentrate_per_mix: f64,
    pub water_per_mix: f64,
    pub pumps_per_mix: f64,
    pub pumps_per_bottle: f64,
    pub cost_per_pump: f64,
    pub cond_cost_per_ml: f64,
    pub conditioner_cost_per_bath: f64,
    pub total_bath_cost: f64,
}

impl CalculationResult {
    /// All numeric outputs with their field names, in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 15] {
        [
            ("yieldFromBottle", self.yield_from_bottle),
            ("costPerMlConcentrate", self.cost_per_ml_concentrate),
            ("costPerMlMixed", self.cost_per_ml_mixed),
            ("costPerMixedLitre", self.cost_per_mixed_litre),
            ("costPer100ml", self.cost_per_100ml),
            ("costPerMixBottle", self.cost_per_mix_bottle),
            ("mixesPerBottle", self.mixes_per_bottle),
            ("concentratePerMix", self.concentrate_per_mix),
            ("waterPerMix", self.water_per_mix),
            ("pumpsPerMix", self.pumps_per_mix),
            ("pumpsPerBottle", self.pumps_per_bottle),
            ("costPerPump", self.cost_per_pump),
            ("condCostPerMl", self.cond_cost_per_ml),
            ("conditionerCostPerBath", self.conditioner_cost_per_bath),
            ("totalBathCost", self.total_bath_cost),
        ]
    }
}

/// What kind of problem a validation pass found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// A required size is zero or negative.
    NonPositive,
    /// The dilution text is not a ratio.
    InvalidDilution,
}

/// A single field-level validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIssue {
    /// camelCase name of the offending input field.
    pub field: String,
    pub kind: IssueKind,
    /// Human-readable explanation.
    pub message: String,
}

/// Response body of a single calculation: numbers plus any issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub result: CalculationResult,
    pub issues: Vec<InputIssue>,
}
