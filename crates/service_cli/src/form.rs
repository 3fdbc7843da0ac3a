//! Untyped key/value form to validated pricing input
//!
//! Fields are looked up by name (`spot`, `rate`, `volatility`, `maturity`,
//! `simulations`, `payoff`). Absent fields take their configured default.
//! All numeric fields are converted before any invariant is checked, so a
//! conversion failure always wins over a validation failure.

use std::collections::BTreeMap;

use pricer_core::types::{InputError, PricingInput};

use crate::config::FieldDefaults;

/// Raw form fields keyed by name.
pub type Form = BTreeMap<String, String>;

fn parse_real(form: &Form, field: &'static str, default: f64) -> Result<f64, InputError> {
    match form.get(field) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| InputError::not_a_number(field, raw.as_str())),
    }
}

// Negative counts convert fine and are rejected by validation, not conversion.
fn parse_count(form: &Form, field: &'static str, default: usize) -> Result<usize, InputError> {
    match form.get(field) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(|n| usize::try_from(n).unwrap_or(0))
            .map_err(|_| InputError::not_a_number(field, raw.as_str())),
    }
}

/// Converts and validates a form.
///
/// # Errors
///
/// - `InputError::NotANumber` if a numeric field does not parse
/// - the first violated invariant otherwise, checked in field order
pub fn parse_form(form: &Form, defaults: &FieldDefaults) -> Result<PricingInput, InputError> {
    let spot = parse_real(form, "spot", defaults.spot)?;
    let rate = parse_real(form, "rate", defaults.rate)?;
    let volatility = parse_real(form, "volatility", defaults.volatility)?;
    let maturity = parse_real(form, "maturity", defaults.maturity)?;
    let simulations = parse_count(form, "simulations", defaults.simulations)?;
    let payoff = form
        .get("payoff")
        .cloned()
        .unwrap_or_else(|| defaults.payoff.clone());

    PricingInput::new(spot, rate, volatility, maturity, simulations, payoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> Form {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_form_uses_defaults() {
        let input = parse_form(&Form::new(), &FieldDefaults::default()).unwrap();
        assert_eq!(input.spot(), 100.0);
        assert_eq!(input.rate(), 0.01);
        assert_eq!(input.volatility(), 0.2);
        assert_eq!(input.maturity(), 1.0);
        assert_eq!(input.simulations(), 10_000);
        assert_eq!(input.payoff(), "maximum(ST - 100, 0)");
    }

    #[test]
    fn test_configured_defaults() {
        let defaults = FieldDefaults {
            spot: 50.0,
            simulations: 100,
            ..Default::default()
        };
        let input = parse_form(&form(&[("rate", "0.05")]), &defaults).unwrap();
        assert_eq!(input.spot(), 50.0);
        assert_eq!(input.rate(), 0.05);
        assert_eq!(input.simulations(), 100);
    }

    #[test]
    fn test_full_form() {
        let input = parse_form(
            &form(&[
                ("spot", " 120.5 "),
                ("rate", "-0.01"),
                ("volatility", "3e-1"),
                ("maturity", "0.5"),
                ("simulations", "+2000"),
                ("payoff", "ST > 100"),
            ]),
            &FieldDefaults::default(),
        )
        .unwrap();

        assert_eq!(input.spot(), 120.5);
        assert_eq!(input.rate(), -0.01);
        assert_eq!(input.volatility(), 0.3);
        assert_eq!(input.maturity(), 0.5);
        assert_eq!(input.simulations(), 2000);
        assert_eq!(input.payoff(), "ST > 100");
    }

    #[test]
    fn test_not_a_number() {
        let err = parse_form(&form(&[("spot", "abc")]), &FieldDefaults::default()).unwrap_err();
        assert_eq!(err, InputError::not_a_number("spot", "abc"));
        assert_eq!(err.to_string(), "All numerical inputs must be valid numbers.");

        // Empty submitted field is not the same as an absent one.
        let err = parse_form(&form(&[("maturity", "")]), &FieldDefaults::default()).unwrap_err();
        assert_eq!(err.field(), "maturity");

        // Simulations must be an integer literal.
        let err =
            parse_form(&form(&[("simulations", "100.5")]), &FieldDefaults::default()).unwrap_err();
        assert_eq!(err.field(), "simulations");
    }

    #[test]
    fn test_conversion_checked_before_validation() {
        let err = parse_form(
            &form(&[("spot", "-1"), ("volatility", "high")]),
            &FieldDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, InputError::NotANumber { field: "volatility", .. }));
    }

    #[test]
    fn test_validation_messages() {
        let defaults = FieldDefaults::default();
        let cases = [
            (("spot", "0"), "Spot price must be positive."),
            (("volatility", "-0.2"), "Volatility must be positive."),
            (("maturity", "0"), "Time to maturity must be positive."),
            (("simulations", "0"), "Simulations must be a positive integer."),
            (("simulations", "-5"), "Simulations must be a positive integer."),
            (("payoff", "   "), "Payoff expression cannot be empty."),
        ];

        for ((field, value), message) in cases {
            let err = parse_form(&form(&[(field, value)]), &defaults).unwrap_err();
            assert_eq!(err.to_string(), message, "{field}={value}");
        }
    }

    #[test]
    fn test_payoff_not_parsed_here() {
        // Expression syntax is the evaluator's concern.
        let input = parse_form(&form(&[("payoff", "os")]), &FieldDefaults::default()).unwrap();
        assert_eq!(input.payoff(), "os");
    }
}
