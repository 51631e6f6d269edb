//! Cost and yield computation engine.
//!
//! The `engine` module turns a [`CalculationInput`] into a
//! [`CalculationResult`] in a single pass.  Every step is a pure
//! function of the input.  Divisions check their denominators first and
//! yield zero instead of an infinite or NaN value, so a half-typed form
//! still produces a complete, stable set of numbers.  Batches are
//! spread across CPU cores with [`rayon`].

use crate::dilution::{parse_dilution, Ratio};
use crate::models::{CalculationInput, CalculationResult};
use crate::units::{parse_numeric_or_zero, to_millilitres};
use rayon::prelude::*;

/// Input values after coercion and unit normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Normalized {
    pub bottle_ml: f64,
    pub bottle_cost: f64,
    pub mix_ml: f64,
    pub pump_ml: f64,
    pub cond_bottle_ml: f64,
    pub cond_bottle_cost: f64,
    pub cond_use_ml: f64,
}

impl Normalized {
    pub(crate) fn from_input(input: &CalculationInput) -> Self {
        Self {
            bottle_ml: to_millilitres(
                parse_numeric_or_zero(&input.bottle_size),
                input.bottle_unit,
            ),
            bottle_cost: parse_numeric_or_zero(&input.bottle_cost).max(0.0),
            mix_ml: to_millilitres(parse_numeric_or_zero(&input.mix_size), input.mix_unit),
            pump_ml: parse_numeric_or_zero(&input.pump_ml),
            cond_bottle_ml: to_millilitres(
                parse_numeric_or_zero(&input.cond_bottle_size),
                input.cond_bottle_unit,
            ),
            cond_bottle_cost: parse_numeric_or_zero(&input.cond_bottle_cost).max(0.0),
            cond_use_ml: parse_numeric_or_zero(&input.cond_use_per_bath_ml),
        }
    }
}

/// `numerator / denominator`, or zero when the denominator is not
/// strictly positive.
fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        finite_or_zero(numerator / denominator)
    } else {
        0.0
    }
}

/// Collapse NaN and infinities to zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Compute every derived quantity for one set of form inputs.
pub fn compute(input: &CalculationInput) -> CalculationResult {
    let ratio = parse_dilution(&input.dilution);
    let values = Normalized::from_input(input);
    derive(ratio, &values)
}

fn derive(ratio: Ratio, v: &Normalized) -> CalculationResult {
    let valid = ratio.valid;
    let total_parts = ratio.total_parts;

    // Each value is clamped where it is produced, so later fields are
    // built from exactly the numbers that get returned.
    let yield_from_bottle = if valid {
        finite_or_zero(v.bottle_ml * total_parts)
    } else {
        0.0
    };
    let cost_per_ml_concentrate = guarded_div(v.bottle_cost, v.bottle_ml);
    let cost_per_ml_mixed = if valid {
        guarded_div(cost_per_ml_concentrate, total_parts)
    } else {
        0.0
    };
    let cost_per_mixed_litre = finite_or_zero(cost_per_ml_mixed * 1000.0);
    let cost_per_100ml = finite_or_zero(cost_per_ml_mixed * 100.0);
    let cost_per_mix_bottle = finite_or_zero(cost_per_ml_mixed * v.mix_ml);

    let mixes_per_bottle = if valid {
        guarded_div(yield_from_bottle, v.mix_ml)
    } else {
        0.0
    };
    let concentrate_per_mix = if valid {
        guarded_div(v.mix_ml, total_parts)
    } else {
        0.0
    };
    let water_per_mix = if valid {
        finite_or_zero(v.mix_ml - concentrate_per_mix)
    } else {
        0.0
    };

    let pumps_per_mix = guarded_div(concentrate_per_mix, v.pump_ml);
    let pumps_per_bottle = guarded_div(v.bottle_ml, v.pump_ml);
    let cost_per_pump = guarded_div(cost_per_mix_bottle, pumps_per_mix);

    let cond_cost_per_ml = guarded_div(v.cond_bottle_cost, v.cond_bottle_ml);
    let conditioner_cost_per_bath = finite_or_zero(cond_cost_per_ml * v.cond_use_ml.max(0.0));
    let total_bath_cost = finite_or_zero(cost_per_mix_bottle + conditioner_cost_per_bath);

    CalculationResult {
        ratio,
        yield_from_bottle,
        cost_per_ml_concentrate,
        cost_per_ml_mixed,
        cost_per_mixed_litre,
        cost_per_100ml,
        cost_per_mix_bottle,
        mixes_per_bottle,
        concentrate_per_mix,
        water_per_mix,
        pumps_per_mix,
        pumps_per_bottle,
        cost_per_pump,
        cond_cost_per_ml,
        conditioner_cost_per_bath,
        total_bath_cost,
    }
}

/// Runs [`compute`] over many inputs in parallel, preserving order.
pub fn compute_batch(inputs: &[CalculationInput]) -> Vec<CalculationResult> {
    inputs.par_iter().map(compute).collect()
}
