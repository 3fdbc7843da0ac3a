//! Terminal price sampling under risk-neutral geometric Brownian motion.
//!
//! European payoffs only depend on the terminal price, so each path is a
//! single exact lognormal draw rather than a discretised path:
//!
//! ```text
//! S(T) = S(0) × exp((r - ½σ²)T + σ√T × Z),   Z ~ N(0, 1)
//! ```

use pricer_core::types::PricingInput;

use crate::rng::NormalSource;

/// Parameters for Geometric Brownian Motion.
///
/// # Model
///
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.01, 0.2, 1.0);
/// assert!((params.drift() - (0.01 - 0.02)).abs() < 1e-15);
/// assert!((params.diffusion() - 0.2).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r) - annualised.
    pub rate: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Time to maturity (T) - in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// Log-space drift over the whole horizon, (r - ½σ²)T.
    #[inline]
    pub fn drift(&self) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * self.maturity
    }

    /// Log-space diffusion scale over the whole horizon, σ√T.
    #[inline]
    pub fn diffusion(&self) -> f64 {
        self.volatility * self.maturity.sqrt()
    }
}

impl From<&PricingInput> for GbmParams {
    fn from(input: &PricingInput) -> Self {
        Self::new(
            input.spot(),
            input.rate(),
            input.volatility(),
            input.maturity(),
        )
    }
}

/// Samples `simulations` terminal prices.
///
/// Draws one standard normal per path from `source` into the output buffer
/// and transforms it in place. Parameters are assumed valid (positive spot,
/// volatility and maturity), which [`PricingInput`] guarantees.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{sample_terminal_prices, GbmParams};
/// use pricer_pricing::rng::PricerRng;
///
/// let params = GbmParams::new(100.0, 0.01, 0.2, 1.0);
/// let mut rng = PricerRng::from_seed(42);
/// let prices = sample_terminal_prices(&params, 1_000, &mut rng);
///
/// assert_eq!(prices.len(), 1_000);
/// assert!(prices.iter().all(|&s| s >= 0.0));
/// ```
pub fn sample_terminal_prices<S>(params: &GbmParams, simulations: usize, source: &mut S) -> Vec<f64>
where
    S: NormalSource + ?Sized,
{
    let drift = params.drift();
    let diffusion = params.diffusion();

    let mut prices = vec![0.0; simulations];
    source.fill_normal(&mut prices);

    for value in prices.iter_mut() {
        *value = params.spot * (drift + diffusion * *value).exp();
    }

    prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PricerRng;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    /// Replays a fixed sequence of draws.
    struct FixedDraws(Vec<f64>);

    impl NormalSource for FixedDraws {
        fn fill_normal(&mut self, buffer: &mut [f64]) {
            for (slot, z) in buffer.iter_mut().zip(self.0.iter().cycle()) {
                *slot = *z;
            }
        }
    }

    #[test]
    fn test_drift_and_diffusion() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 4.0);
        assert_relative_eq!(params.drift(), (0.05 - 0.02) * 4.0, epsilon = 1e-15);
        assert_relative_eq!(params.diffusion(), 0.4, epsilon = 1e-15);
    }

    #[test]
    fn test_from_input() {
        let input = PricingInput::new(120.0, -0.01, 0.3, 0.5, 10, "ST").unwrap();
        let params = GbmParams::from(&input);
        assert_eq!(params, GbmParams::new(120.0, -0.01, 0.3, 0.5));
    }

    #[test]
    fn test_exact_transform_of_draws() {
        let params = GbmParams::new(100.0, 0.01, 0.2, 1.0);
        let mut source = FixedDraws(vec![0.0, 1.0, -1.0]);
        let prices = sample_terminal_prices(&params, 3, &mut source);

        let drift = params.drift();
        assert_relative_eq!(prices[0], 100.0 * drift.exp(), epsilon = 1e-12);
        assert_relative_eq!(prices[1], 100.0 * (drift + 0.2).exp(), epsilon = 1e-12);
        assert_relative_eq!(prices[2], 100.0 * (drift - 0.2).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_simulations_is_empty() {
        let params = GbmParams::new(100.0, 0.01, 0.2, 1.0);
        let mut rng = PricerRng::from_seed(1);
        assert!(sample_terminal_prices(&params, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let params = GbmParams::new(100.0, 0.01, 0.2, 1.0);
        let a = sample_terminal_prices(&params, 500, &mut PricerRng::from_seed(42));
        let b = sample_terminal_prices(&params, 500, &mut PricerRng::from_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_risk_neutral_mean() {
        // E[S(T)] = S(0)·e^{rT}
        let params = GbmParams::new(100.0, 0.03, 0.25, 2.0);
        let n = 200_000;
        let prices = sample_terminal_prices(&params, n, &mut PricerRng::from_seed(7));

        let mean = prices.iter().sum::<f64>() / n as f64;
        let var = prices.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let se = (var / n as f64).sqrt();

        let expected = 100.0 * (0.03_f64 * 2.0).exp();
        assert!((mean - expected).abs() < 4.0 * se, "mean {mean}, expected {expected}, se {se}");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_length_and_non_negativity(
            spot in 0.01f64..1_000.0,
            rate in -0.1f64..0.2,
            vol in 0.01f64..1.5,
            maturity in 0.01f64..10.0,
            n in 0usize..512,
            seed in any::<u64>()
        ) {
            let params = GbmParams::new(spot, rate, vol, maturity);
            let prices = sample_terminal_prices(&params, n, &mut PricerRng::from_seed(seed));

            prop_assert_eq!(prices.len(), n);
            for s in prices {
                prop_assert!(s.is_finite());
                prop_assert!(s >= 0.0);
            }
        }
    }
}
