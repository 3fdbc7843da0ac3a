//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper that offers
//! reproducible random number generation with efficient batch operations,
//! and the [`NormalSource`] trait through which the sampler draws normals.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Source of standard normal variates.
///
/// Implemented by [`PricerRng`]; tests can supply fixed draws.
pub trait NormalSource {
    /// Fills `buffer` with independent standard normal variates.
    fn fill_normal(&mut self, buffer: &mut [f64]);
}

/// Monte Carlo simulation random number generator.
///
/// Not `Clone`: each pricing call owns its generator.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
/// assert_eq!(rng.seed(), 42);
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Debug)]
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed always produces the same sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut a = [0.0; 4];
    /// let mut b = [0.0; 4];
    /// PricerRng::from_seed(12345).fill_normal(&mut a);
    /// PricerRng::from_seed(12345).fill_normal(&mut b);
    /// assert_eq!(a, b);
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a new RNG instance from a freshly drawn seed.
    ///
    /// The seed comes from the thread-local OS-seeded generator and is
    /// recorded, so `PricerRng::from_seed(rng.seed())` replays the stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng = PricerRng::from_entropy();
    /// let mut replay = PricerRng::from_seed(rng.seed());
    ///
    /// let mut a = [0.0; 4];
    /// let mut b = [0.0; 4];
    /// rng.fill_normal(&mut a);
    /// replay.fill_normal(&mut b);
    /// assert_eq!(a, b);
    /// ```
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::from_seed(seed)
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fills the buffer with standard normal (mean=0, std=1) variates.
    ///
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

impl NormalSource for PricerRng {
    #[inline]
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        PricerRng::fill_normal(self, buffer);
    }
}
