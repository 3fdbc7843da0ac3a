//! Monte Carlo pricing of a payoff expression.
//!
//! Orchestrates one pricing call:
//!
//! ```text
//! PricingInput ─┬─> PayoffExpr::parse ─────────────────┐
//!               └─> sample_terminal_prices ─> ST ─> evaluate ─> discount ─> mean, std error
//! ```
//!
//! The expression is parsed before any sampling so an invalid payoff fails
//! fast. Every call owns its generator, input and buffers.

use pricer_core::types::PricingInput;
use pricer_models::payoff::{InvalidExpression, PayoffExpr};

use super::sampler::{sample_terminal_prices, GbmParams};
use crate::rng::{NormalSource, PricerRng};

/// Monte Carlo price estimate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 10.5,
///     std_error: 0.05,
///     terminal_prices: vec![95.0, 125.0],
/// };
///
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// let (price, terminal_prices) = result.into_parts();
/// assert_eq!(price, 10.5);
/// assert_eq!(terminal_prices.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PricingResult {
    /// Present value: mean of the discounted payoffs.
    pub price: f64,
    /// Standard error of the price estimate (0 for a single path).
    pub std_error: f64,
    /// Simulated terminal prices, one per path.
    pub terminal_prices: Vec<f64>,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Returns the number of simulated paths.
    #[inline]
    pub fn simulations(&self) -> usize {
        self.terminal_prices.len()
    }

    /// Splits into the price estimate and the terminal prices.
    #[inline]
    pub fn into_parts(self) -> (f64, Vec<f64>) {
        (self.price, self.terminal_prices)
    }
}

/// Prices `input` by Monte Carlo simulation.
///
/// With `Some(seed)` the result is bit-for-bit reproducible. With `None`
/// a seed is drawn from entropy and logged at debug level.
///
/// # Errors
///
/// Returns [`InvalidExpression`] if the payoff does not parse. No paths are
/// simulated in that case.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::PricingInput;
/// use pricer_pricing::price_option;
///
/// let input = PricingInput::new(100.0, 0.01, 0.2, 1.0, 10_000, "maximum(ST - 100, 0)").unwrap();
/// let result = price_option(&input, Some(42)).unwrap();
///
/// assert_eq!(result.terminal_prices.len(), 10_000);
/// assert!(result.price > 0.0);
/// ```
pub fn price_option(
    input: &PricingInput,
    seed: Option<u64>,
) -> Result<PricingResult, InvalidExpression> {
    let payoff = PayoffExpr::parse(input.payoff())?;

    let mut rng = match seed {
        Some(seed) => PricerRng::from_seed(seed),
        None => PricerRng::from_entropy(),
    };

    let span = tracing::debug_span!(
        "price_option",
        simulations = input.simulations() as u64,
        seed = rng.seed(),
        seeded = seed.is_some()
    );
    let _guard = span.enter();

    Ok(price_with_source(input, &payoff, &mut rng))
}

/// Prices an already parsed payoff, drawing normals from `source`.
///
/// `payoff` is evaluated as given; `input.payoff()` is not consulted.
pub fn price_with_source<S>(input: &PricingInput, payoff: &PayoffExpr, source: &mut S) -> PricingResult
where
    S: NormalSource + ?Sized,
{
    let params = GbmParams::from(input);
    let terminal_prices = sample_terminal_prices(&params, input.simulations(), source);

    let payoffs = payoff.evaluate(&terminal_prices);
    let discount_factor = input.discount_factor();
    let discounted: Vec<f64> = payoffs.iter().map(|p| p * discount_factor).collect();

    let (price, std_error) = mean_and_std_error(&discounted);

    tracing::debug!(
        payoff = %payoff,
        discount_factor,
        price,
        std_error,
        "Monte Carlo estimate"
    );

    PricingResult {
        price,
        std_error,
        terminal_prices,
    }
}

/// Sample mean and standard error of the mean.
///
/// Uses the unbiased variance (n - 1). The standard error is 0 for fewer
/// than two samples.
fn mean_and_std_error(samples: &[f64]) -> (f64, f64) {
    let n = samples.len();
    if n == 0 {
        return (f64::NAN, 0.0);
    }

    let mean = samples.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return (mean, 0.0);
    }

    let variance = samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, (variance / n as f64).sqrt())
}
