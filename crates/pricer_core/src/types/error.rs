//! Error types for input conversion and validation.
//!
//! This module provides:
//! - `InputError`: Raised when raw fields cannot be converted to numbers or
//!   when a [`PricingInput`](super::PricingInput) invariant is violated
//!
//! Every variant is raised before any sampling or payoff evaluation takes
//! place. The messages are user-facing and are surfaced verbatim by the
//! service layer.

use thiserror::Error;

/// Invalid pricing input.
///
/// # Variants
/// - `NotANumber`: A raw form field could not be parsed into its numeric type
/// - `NonPositiveSpot`: Spot price is zero, negative or not finite
/// - `NonFiniteRate`: Risk-free rate is NaN or infinite
/// - `NonPositiveVolatility`: Volatility is zero, negative or not finite
/// - `NonPositiveMaturity`: Time to maturity is zero, negative or not finite
/// - `RateHorizonTooLarge`: `spot` and `rate × maturity` would overflow
///   simulated prices or the discount factor
/// - `NoSimulations`: Simulation count is zero
/// - `EmptyPayoff`: Payoff expression is empty after trimming whitespace
///
/// # Examples
/// ```
/// use pricer_core::types::InputError;
///
/// let err = InputError::NoSimulations;
/// assert_eq!(err.to_string(), "Simulations must be a positive integer.");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    /// A numeric field held a value that does not parse.
    #[error("All numerical inputs must be valid numbers.")]
    NotANumber {
        /// Name of the offending field.
        field: &'static str,
        /// The raw value as received.
        value: String,
    },

    /// Spot price is not strictly positive.
    #[error("Spot price must be positive.")]
    NonPositiveSpot {
        /// The rejected spot price.
        spot: f64,
    },

    /// Risk-free rate is NaN or infinite.
    #[error("Risk-free rate must be a finite number.")]
    NonFiniteRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Volatility is not strictly positive.
    #[error("Volatility must be positive.")]
    NonPositiveVolatility {
        /// The rejected volatility.
        volatility: f64,
    },

    /// Time to maturity is not strictly positive.
    #[error("Time to maturity must be positive.")]
    NonPositiveMaturity {
        /// The rejected maturity.
        maturity: f64,
    },

    /// Growth over the horizon would overflow `f64`.
    #[error("Risk-free rate is too large for the given spot and maturity.")]
    RateHorizonTooLarge {
        /// The rejected rate.
        rate: f64,
        /// Maturity the rate applies over.
        maturity: f64,
    },

    /// Zero simulation paths requested.
    #[error("Simulations must be a positive integer.")]
    NoSimulations,

    /// Payoff expression is blank.
    #[error("Payoff expression cannot be empty.")]
    EmptyPayoff,
}

impl InputError {
    /// Creates a conversion error for a raw field value.
    pub fn not_a_number(field: &'static str, value: impl Into<String>) -> Self {
        Self::NotANumber {
            field,
            value: value.into(),
        }
    }

    /// Returns the name of the field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field, .. } => field,
            Self::NonPositiveSpot { .. } => "spot",
            Self::NonFiniteRate { .. } | Self::RateHorizonTooLarge { .. } => "rate",
            Self::NonPositiveVolatility { .. } => "volatility",
            Self::NonPositiveMaturity { .. } => "maturity",
            Self::NoSimulations => "simulations",
            Self::EmptyPayoff => "payoff",
        }
    }
}
