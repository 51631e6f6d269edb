//! Field validation, kept apart from the engine.
//!
//! The engine happily computes zeros for a blank form; this pass is
//! what tells the user *which* field needs attention.

use crate::dilution::try_parse_dilution;
use crate::models::{CalculationInput, InputIssue, IssueKind};
use crate::units::{parse_numeric_or_zero, to_millilitres, VolumeUnit};

/// Check the required quantities and the dilution text.
pub fn validate(input: &CalculationInput) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    require_positive(
        &mut issues,
        "bottleSize",
        "Bottle size",
        &input.bottle_size,
        input.bottle_unit,
    );
    if let Err(err) = try_parse_dilution(&input.dilution) {
        issues.push(InputIssue {
            field: "dilution".to_string(),
            kind: IssueKind::InvalidDilution,
            message: format!("Dilution: {err}"),
        });
    }
    require_positive(
        &mut issues,
        "mixSize",
        "Mixing bottle size",
        &input.mix_size,
        input.mix_unit,
    );

    issues
}

fn require_positive(
    issues: &mut Vec<InputIssue>,
    field: &str,
    label: &str,
    raw: &str,
    unit: VolumeUnit,
) {
    if to_millilitres(parse_numeric_or_zero(raw), unit) <= 0.0 {
        issues.push(InputIssue {
            field: field.to_string(),
            kind: IssueKind::NonPositive,
            message: format!("{label} must be greater than zero"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CalculationInput {
        CalculationInput {
            bottle_size: "1".into(),
            bottle_unit: VolumeUnit::Litre,
            bottle_cost: "20".into(),
            dilution: "1:10".into(),
            mix_size: "16".into(),
            mix_unit: VolumeUnit::FluidOunce,
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_input_has_no_issues() {
        assert!(validate(&filled()).is_empty());
    }

    #[test]
    fn test_blank_form_flags_required_fields() {
        let issues = validate(&CalculationInput::default());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["bottleSize", "dilution", "mixSize"]);
        assert_eq!(issues[0].kind, IssueKind::NonPositive);
        assert_eq!(issues[1].kind, IssueKind::InvalidDilution);
        assert_eq!(issues[1].message, "Dilution: dilution is empty");
    }

    #[test]
    fn test_negative_mix_and_bad_ratio() {
        let mut input = filled();
        input.mix_size = "-3".into();
        input.dilution = "0:5".into();
        let issues = validate(&input);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "dilution");
        assert_eq!(issues[0].kind, IssueKind::InvalidDilution);
        assert_eq!(issues[1].field, "mixSize");
        assert_eq!(issues[1].kind, IssueKind::NonPositive);
    }
}
