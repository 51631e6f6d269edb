//! Dilution ratio parsing.
//!
//! Users type ratios in many shapes: `1:16`, `1/16`, `1 to 16`, `16x`
//! or just `16`.  The parser first rewrites every separator it knows to
//! a colon, then tries a single `<number>:<number>` match, and finally
//! falls back to reading a bare number as shorthand for `1:n`.

use crate::error::DilutionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Word separators: `to`, `in` and the multiplier `x`.
static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:to|in|x)\s*").expect("valid word separator pattern"));

/// Symbol separators, together with any whitespace around them.
static SYMBOL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[-/:]\s*").expect("valid symbol separator pattern"));

/// A minus sign where a number is expected, as opposed to a `-` separator.
static NEGATIVE_SIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[:/]|to|in)\s*-").expect("valid negative sign pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// `<concentrate>:<water>`, unsigned decimals without exponents.
static RATIO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]*)?|\.[0-9]+):([0-9]+(?:\.[0-9]*)?|\.[0-9]+)$")
        .expect("valid ratio pattern")
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("valid number pattern"));

/// A parsed dilution, normalized to one part concentrate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratio {
    /// Parts water per one part concentrate.
    pub water_parts: f64,
    /// `1 + water_parts`; never below one.
    pub total_parts: f64,
    /// Canonical `1:<water>` rendering.
    pub label: String,
    /// False when the text could not be interpreted.  The numbers of an
    /// invalid ratio are placeholders (`1:0`), not a real dilution.
    pub valid: bool,
}

impl Ratio {
    /// Ratio of one part concentrate to `water_parts` water.
    pub fn one_to(water_parts: f64) -> Self {
        Self {
            water_parts,
            total_parts: 1.0 + water_parts,
            label: format!("1:{}", trim_trailing_zeros(water_parts)),
            valid: true,
        }
    }

    /// The placeholder returned for text that is not a ratio.
    pub fn invalid() -> Self {
        Self {
            water_parts: 0.0,
            total_parts: 1.0,
            label: "1:0".to_string(),
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Water parts, or `None` for an invalid ratio.
    pub fn valid_water_parts(&self) -> Option<f64> {
        self.valid.then_some(self.water_parts)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Parse a dilution expression, returning the invalid placeholder on
/// failure.  Never panics and never errors.
pub fn parse_dilution(text: &str) -> Ratio {
    try_parse_dilution(text).unwrap_or_else(|_| Ratio::invalid())
}

/// Parse a dilution expression, reporting why it was rejected.
pub fn try_parse_dilution(text: &str) -> Result<Ratio, DilutionError> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(DilutionError::Empty);
    }
    if NEGATIVE_SIGN.is_match(&lowered) {
        return Err(DilutionError::NegativeWater);
    }
    let normalized = normalize_separators(&lowered);

    if let Some(caps) = RATIO.captures(&normalized) {
        let concentrate = parse_part(&caps[1])?;
        let water = parse_part(&caps[2])?;
        if concentrate <= 0.0 {
            return Err(DilutionError::NonPositiveConcentrate);
        }
        if water < 0.0 {
            return Err(DilutionError::NegativeWater);
        }
        let effective = if concentrate == 1.0 {
            water
        } else {
            water / concentrate
        };
        if !effective.is_finite() {
            return Err(DilutionError::NonFinite);
        }
        if effective < 0.0 {
            return Err(DilutionError::NegativeWater);
        }
        return Ok(Ratio::one_to(effective));
    }

    // "16x" and "x16" leave a dangling colon after normalization.
    let bare = if lowered.starts_with('x') || lowered.ends_with('x') {
        normalized.trim_matches(':')
    } else {
        normalized.as_str()
    };
    if BARE_NUMBER.is_match(bare) {
        let water = parse_part(bare)?;
        return Ok(Ratio::one_to(water));
    }

    Err(DilutionError::Unrecognised(text.trim().to_string()))
}

/// Rewrite every separator form to a single colon and drop whitespace.
fn normalize_separators(lowered: &str) -> String {
    let words = WORD_SEPARATOR.replace_all(lowered, ":");
    let symbols = SYMBOL_SEPARATOR.replace_all(&words, ":");
    let spaced = WHITESPACE.replace_all(symbols.trim(), ":");
    spaced.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_part(part: &str) -> Result<f64, DilutionError> {
    match part.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DilutionError::NonFinite),
    }
}

/// Render with six decimals, then drop trailing zeros and a bare point.
///
/// `16.0` becomes `"16"`, `16.5` becomes `"16.5"`.
pub fn trim_trailing_zeros(value: f64) -> String {
    let fixed = format!("{:.6}", value);
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_one_to_sixteen(text: &str) {
        let ratio = parse_dilution(text);
        assert!(ratio.valid, "{text:?} should parse");
        assert_eq!(ratio.water_parts, 16.0, "{text:?}");
        assert_eq!(ratio.total_parts, 17.0, "{text:?}");
        assert_eq!(ratio.label, "1:16", "{text:?}");
    }

    #[test]
    fn test_separator_forms_are_equivalent() {
        for text in [
            "1:16", "1/16", "1 to 16", "1 TO 16", "1-16", "1 16", "1 in 16", "1 x 16", "16x",
            "x16", "16", " 1 : 16 ", "2:32", "0.5:8",
        ] {
            assert_one_to_sixteen(text);
        }
    }

    #[test]
    fn test_invalid_inputs_give_placeholder() {
        for text in ["", "   ", "abc", "0:5", "1:-5", "-16", "1:2:3", "1e3", "1..2", "/16"] {
            let ratio = parse_dilution(text);
            assert!(!ratio.valid, "{text:?} should be rejected");
            assert_eq!(ratio.water_parts, 0.0);
            assert_eq!(ratio.total_parts, 1.0);
            assert_eq!(ratio.label, "1:0");
        }
    }

    #[test]
    fn test_try_parse_reports_reason() {
        assert_eq!(try_parse_dilution("  "), Err(DilutionError::Empty));
        assert_eq!(
            try_parse_dilution("0:5"),
            Err(DilutionError::NonPositiveConcentrate)
        );
        assert_eq!(try_parse_dilution("1:-5"), Err(DilutionError::NegativeWater));
        assert_eq!(
            try_parse_dilution("abc"),
            Err(DilutionError::Unrecognised("abc".to_string()))
        );
    }

    #[test]
    fn test_zero_water_is_a_real_ratio() {
        let ratio = parse_dilution("1:0");
        assert!(ratio.is_valid());
        assert_eq!(ratio.valid_water_parts(), Some(0.0));
        assert_eq!(ratio.total_parts, 1.0);
        let junk = parse_dilution("junk");
        assert!(!junk.is_valid());
        assert_eq!(junk.valid_water_parts(), None);
    }

    #[test]
    fn test_fractional_ratios() {
        let ratio = parse_dilution("3:10");
        assert!(ratio.valid);
        assert!((ratio.water_parts - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(ratio.label, "1:3.333333");

        assert_eq!(parse_dilution("1:16.5").label, "1:16.5");
        assert_eq!(parse_dilution(".5").label, "1:0.5");
    }

    #[test]
    fn test_trim_trailing_zeros() {
        assert_eq!(trim_trailing_zeros(16.0), "16");
        assert_eq!(trim_trailing_zeros(16.5), "16.5");
        assert_eq!(trim_trailing_zeros(0.333333), "0.333333");
        assert_eq!(trim_trailing_zeros(0.0), "0");
        assert_eq!(trim_trailing_zeros(100.0), "100");
        assert_eq!(trim_trailing_zeros(0.0000001), "0");
    }
}
