//! Black-Scholes closed-form prices for European claims on `ST`.
//!
//! Reference values for Monte Carlo estimates of the corresponding payoff
//! expressions:
//!
//! | Expression            | Method              |
//! |-----------------------|---------------------|
//! | `maximum(ST - K, 0)`  | [`BlackScholes::price_call`] |
//! | `maximum(K - ST, 0)`  | [`BlackScholes::price_put`] |
//! | `ST > K`              | [`BlackScholes::price_digital_call`] |
//! | `ST < K`              | [`BlackScholes::price_digital_put`] |
//! | `ST`                  | [`BlackScholes::discounted_forward`] |
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//! **Cash-or-nothing call**: e^(-rT)·N(d₂)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::{lit, norm_cdf};
use super::error::AnalyticalError;

/// Expiries at or below this are treated as already expired.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.01, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.01_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Continuously compounded risk-free rate, may be negative
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self, expiry: T) -> T {
        (-self.rate * expiry).exp()
    }

    /// Forward price S·e^(rT), the risk-neutral mean of `ST`.
    #[inline]
    pub fn forward(&self, expiry: T) -> T {
        self.spot * (self.rate * expiry).exp()
    }

    /// Present value of receiving `ST` at expiry, which equals the spot.
    #[inline]
    pub fn discounted_forward(&self, expiry: T) -> T {
        self.discount_factor(expiry) * self.forward(expiry)
    }

    #[inline]
    fn is_expired(expiry: T) -> bool {
        expiry <= lit::<T>(EXPIRY_EPSILON)
    }

    /// Computes d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T).
    ///
    /// At expiry returns ±100 (or 0 at the money) as a stand-in for ±∞.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            let large = lit::<T>(100.0);
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + lit::<T>(0.5) * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call, payoff `maximum(ST - K, 0)`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.01, 0.2).unwrap();
    /// assert!((bs.price_call(100.0, 1.0) - 8.433).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return (self.spot - strike).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        self.spot * norm_cdf(d1) - strike * self.discount_factor(expiry) * norm_cdf(d2)
    }

    /// European put, payoff `maximum(K - ST, 0)`.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return (strike - self.spot).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        strike * self.discount_factor(expiry) * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// Cash-or-nothing call paying 1, payoff `ST > K`.
    #[inline]
    pub fn price_digital_call(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return if self.spot > strike { T::one() } else { T::zero() };
        }
        self.discount_factor(expiry) * norm_cdf(self.d2(strike, expiry))
    }

    /// Cash-or-nothing put paying 1, payoff `ST < K`.
    #[inline]
    pub fn price_digital_put(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return if self.spot < strike { T::one() } else { T::zero() };
        }
        self.discount_factor(expiry) * norm_cdf(-self.d2(strike, expiry))
    }
}
