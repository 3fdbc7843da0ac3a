//! Validated pricing input.
//!
//! [`PricingInput`] is the single value handed to the Monte Carlo engine.
//! Its fields are private and its only constructor validates every
//! invariant, so an instance can never describe an unpriceable contract.

use super::error::InputError;

/// Field defaults applied by form-style front ends when a field is absent.
pub mod defaults {
    /// Default spot price.
    pub const SPOT: f64 = 100.0;
    /// Default continuously-compounded risk-free rate.
    pub const RATE: f64 = 0.01;
    /// Default annualised volatility.
    pub const VOLATILITY: f64 = 0.2;
    /// Default time to maturity in years.
    pub const MATURITY: f64 = 1.0;
    /// Default number of Monte Carlo paths.
    pub const SIMULATIONS: usize = 10_000;
    /// Default payoff: an at-the-money call struck at 100.
    pub const PAYOFF: &str = "maximum(ST - 100, 0)";
}

/// Upper bound on `ln(max(spot, 1)) + |rate × maturity|`.
///
/// Leaves about 60 in log space below `ln(f64::MAX)` for the diffusion term,
/// so terminal prices and the discount factor stay finite.
pub const MAX_LOG_GROWTH: f64 = 650.0;

/// Parameters of a single pricing request.
///
/// # Invariants
///
/// - `spot > 0` and finite
/// - `rate` finite (negative rates are allowed)
/// - `volatility > 0` and finite
/// - `maturity > 0` and finite
/// - `ln(max(spot, 1)) + |rate × maturity| <= MAX_LOG_GROWTH`
/// - `simulations > 0`
/// - `payoff` is not blank after trimming
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::PricingInput;
///
/// let input = PricingInput::new(100.0, 0.01, 0.2, 1.0, 10_000, "maximum(ST - 100, 0)")
///     .expect("valid input");
/// assert_eq!(input.simulations(), 10_000);
///
/// assert!(PricingInput::new(100.0, 0.01, 0.2, 1.0, 0, "ST").is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingInput {
    spot: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    simulations: usize,
    payoff: String,
}

impl PricingInput {
    /// Creates a validated pricing input.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, checked in the order spot,
    /// rate, volatility, maturity, simulations, payoff.
    pub fn new(
        spot: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
        simulations: usize,
        payoff: impl Into<String>,
    ) -> Result<Self, InputError> {
        let input = Self {
            spot,
            rate,
            volatility,
            maturity,
            simulations,
            payoff: payoff.into(),
        };
        input.validate()?;
        Ok(input)
    }

    fn validate(&self) -> Result<(), InputError> {
        // `!(x > 0.0)` also rejects NaN
        if !(self.spot > 0.0) || !self.spot.is_finite() {
            return Err(InputError::NonPositiveSpot { spot: self.spot });
        }
        if !self.rate.is_finite() {
            return Err(InputError::NonFiniteRate { rate: self.rate });
        }
        if !(self.volatility > 0.0) || !self.volatility.is_finite() {
            return Err(InputError::NonPositiveVolatility {
                volatility: self.volatility,
            });
        }
        if !(self.maturity > 0.0) || !self.maturity.is_finite() {
            return Err(InputError::NonPositiveMaturity {
                maturity: self.maturity,
            });
        }
        let growth = self.spot.ln().max(0.0) + (self.rate * self.maturity).abs();
        if !(growth <= MAX_LOG_GROWTH) {
            return Err(InputError::RateHorizonTooLarge {
                rate: self.rate,
                maturity: self.maturity,
            });
        }
        if self.simulations == 0 {
            return Err(InputError::NoSimulations);
        }
        if self.payoff.trim().is_empty() {
            return Err(InputError::EmptyPayoff);
        }
        Ok(())
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the continuously-compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the number of Monte Carlo paths.
    #[inline]
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Returns the payoff expression as entered.
    #[inline]
    pub fn payoff(&self) -> &str {
        &self.payoff
    }

    /// Returns the discount factor `exp(-rate * maturity)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}

impl Default for PricingInput {
    fn default() -> Self {
        Self {
            spot: defaults::SPOT,
            rate: defaults::RATE,
            volatility: defaults::VOLATILITY,
            maturity: defaults::MATURITY,
            simulations: defaults::SIMULATIONS,
            payoff: defaults::PAYOFF.to_string(),
        }
    }
}
