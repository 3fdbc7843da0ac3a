//! Analytical comparison tests for Monte Carlo pricing.
//!
//! These tests verify that Monte Carlo prices of payoff expressions converge
//! to the closed-form Black-Scholes values of the same claims.
//!
//! # Test Categories
//!
//! 1. **Vanilla Options**: `maximum(ST - K, 0)` / `maximum(K - ST, 0)`
//! 2. **Digital Options**: indicator payoffs such as `ST > K`
//! 3. **Linear Payoff**: `ST` prices to the spot
//! 4. **Input and Expression Rejection**

use approx::assert_relative_eq;
use pricer_core::types::{InputError, PricingInput};
use pricer_models::analytical::BlackScholes;
use pricer_pricing::{price_option, PricingError, PricingResult};

/// Standard test parameters for comparison tests.
fn standard_params() -> (f64, f64, f64, f64, f64) {
    (100.0, 100.0, 0.01, 0.2, 1.0) // spot, strike, rate, vol, maturity
}

fn standard_model() -> BlackScholes<f64> {
    let (spot, _strike, rate, vol, _maturity) = standard_params();
    BlackScholes::new(spot, rate, vol).unwrap()
}

fn price(payoff: &str, simulations: usize, seed: u64) -> PricingResult {
    let (spot, _strike, rate, vol, maturity) = standard_params();
    let input = PricingInput::new(spot, rate, vol, maturity, simulations, payoff).unwrap();
    price_option(&input, Some(seed)).unwrap()
}

fn assert_within(result: &PricingResult, analytical: f64, std_errors: f64, floor: f64, label: &str) {
    let tolerance = (std_errors * result.std_error).max(floor);
    let error = (result.price - analytical).abs();
    assert!(
        error < tolerance,
        "{}: MC={:.4}, Analytical={:.4}, Error={:.4}, Tolerance={:.4}",
        label,
        result.price,
        analytical,
        error,
        tolerance
    );
}

// ============================================================================
// Vanilla Option Tests
// ============================================================================

#[test]
fn test_call_mc_vs_black_scholes() {
    let (_spot, strike, _rate, _vol, maturity) = standard_params();
    let analytical = standard_model().price_call(strike, maturity);
    assert_relative_eq!(analytical, 8.43, epsilon = 0.01);

    let result = price("maximum(ST - 100, 0)", 10_000, 42);

    assert_eq!(result.terminal_prices.len(), 10_000);
    assert!(result.std_error > 0.0);
    assert_within(&result, analytical, 3.0, 0.5, "European Call");
}

#[test]
fn test_put_mc_vs_black_scholes() {
    let (_spot, strike, _rate, _vol, maturity) = standard_params();
    let analytical = standard_model().price_put(strike, maturity);

    let result = price("maximum(100 - ST, 0)", 50_000, 7);
    assert_within(&result, analytical, 4.0, 0.3, "European Put");
}

#[test]
fn test_put_call_parity_same_seed() {
    // Per path max(S-K,0) - max(K-S,0) = S-K, so parity holds exactly on a shared seed.
    let (_spot, strike, rate, _vol, maturity) = standard_params();
    let call = price("maximum(ST - 100, 0)", 10_000, 11);
    let put = price("max(100 - ST, 0)", 10_000, 11);
    assert_eq!(call.terminal_prices, put.terminal_prices);

    let n = call.terminal_prices.len() as f64;
    let mean_st = call.terminal_prices.iter().sum::<f64>() / n;
    let discount = (-rate * maturity).exp();

    assert_relative_eq!(
        call.price - put.price,
        discount * (mean_st - strike),
        epsilon = 1e-9
    );
}

// ============================================================================
// Digital Option Tests
// ============================================================================

#[test]
fn test_digital_call_mc_vs_analytical() {
    let (_spot, strike, _rate, _vol, maturity) = standard_params();
    let analytical = standard_model().price_digital_call(strike, maturity);

    let result = price("ST > 100", 10_000, 42);
    assert_within(&result, analytical, 4.0, 0.02, "Digital Call");
}

#[test]
fn test_scaled_digital_put_mc_vs_analytical() {
    let (_spot, _strike, _rate, _vol, maturity) = standard_params();
    let analytical = 10.0 * standard_model().price_digital_put(95.0, maturity);

    let result = price("where(ST < 95, 10, 0)", 20_000, 3);
    assert_within(&result, analytical, 4.0, 0.2, "Digital Put x10");
}

// ============================================================================
// Linear Payoff and Convergence Tests
// ============================================================================

#[test]
fn test_linear_payoff_prices_to_spot() {
    let (spot, _strike, _rate, _vol, maturity) = standard_params();
    let analytical = standard_model().discounted_forward(maturity);
    assert_relative_eq!(analytical, spot, epsilon = 1e-10);

    let result = price("ST", 100_000, 2024);
    assert_within(&result, analytical, 4.0, 0.0, "Linear ST");

    // Undiscounted mean converges to the forward.
    let n = result.terminal_prices.len() as f64;
    let mean_st = result.terminal_prices.iter().sum::<f64>() / n;
    let forward = standard_model().forward(maturity);
    assert!((mean_st - forward).abs() < 0.5, "mean ST {mean_st}, forward {forward}");
}

#[test]
fn test_std_error_shrinks_with_paths() {
    let small = price("maximum(ST - 100, 0)", 1_000, 5);
    let large = price("maximum(ST - 100, 0)", 100_000, 5);

    // Ten times the paths' square root: roughly a tenth of the error.
    assert!(large.std_error < small.std_error / 5.0);
}

// ============================================================================
// Reproducibility and Broadcast Tests
// ============================================================================

#[test]
fn test_fixed_seed_is_bit_identical() {
    let a = price("maximum(ST - 100, 0)", 10_000, 42);
    let b = price("maximum(ST - 100, 0)", 10_000, 42);

    assert_eq!(a.price.to_bits(), b.price.to_bits());
    assert_eq!(a.terminal_prices, b.terminal_prices);
}

#[test]
fn test_constant_payoff_broadcasts() {
    let (_spot, _strike, rate, _vol, maturity) = standard_params();
    let result = price("5", 10_000, 1);

    assert_eq!(result.terminal_prices.len(), 10_000);
    assert_relative_eq!(result.price, 5.0 * (-rate * maturity).exp(), epsilon = 1e-9);
}

#[test]
fn test_terminal_prices_non_negative() {
    let result = price("ST", 10_000, 99);
    assert!(result.terminal_prices.iter().all(|&s| s >= 0.0 && s.is_finite()));
}

// ============================================================================
// Rejection Tests
// ============================================================================

#[test]
fn test_unsafe_expressions_rejected_before_sampling() {
    let (spot, _strike, rate, vol, maturity) = standard_params();

    for payoff in ["__import__('os')", "os", "foo(ST)", "ST.__class__"] {
        let input = PricingInput::new(spot, rate, vol, maturity, 1_000, payoff).unwrap();
        let err = price_option(&input, Some(42)).unwrap_err();

        assert!(err.to_string().starts_with("Invalid payoff expression:"));
        assert_eq!(err.expression(), payoff);
    }
}

#[test]
fn test_zero_simulations_rejected_as_input_error() {
    let (spot, _strike, rate, vol, maturity) = standard_params();
    let err = PricingInput::new(spot, rate, vol, maturity, 0, "maximum(ST - 100, 0)").unwrap_err();

    assert_eq!(err, InputError::NoSimulations);
    assert_eq!(err.to_string(), "Simulations must be a positive integer.");
}

#[test]
fn test_blank_payoff_distinct_from_invalid_expression() {
    fn run(payoff: &str) -> Result<PricingResult, PricingError> {
        let input = PricingInput::new(100.0, 0.01, 0.2, 1.0, 100, payoff)?;
        Ok(price_option(&input, Some(1))?)
    }

    let blank = run("   ").unwrap_err();
    assert!(blank.is_invalid_input());
    assert_eq!(blank.to_string(), "Payoff expression cannot be empty.");

    let invalid = run("ST +").unwrap_err();
    assert!(invalid.is_invalid_expression());
}
