//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for the Monte Carlo sampler.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator knows its seed, including
//!   generators seeded from entropy, so any run can be replayed
//! - **Efficiency**: batch operations fill caller-owned `&mut [f64]` slices
//! - **Injection**: the sampler depends on the [`NormalSource`] trait rather
//!   than on a concrete generator
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//!
//! let mut replay = PricerRng::from_seed(rng.seed());
//! let mut again = vec![0.0; 1000];
//! replay.fill_normal(&mut again);
//! assert_eq!(buffer, again);
//! ```

mod prng;

pub use prng::{NormalSource, PricerRng};
