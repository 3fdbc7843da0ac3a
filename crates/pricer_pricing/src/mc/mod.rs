//! Monte Carlo pricing of European payoff expressions.
//!
//! # Architecture
//!
//! ```text
//! price_option
//! ├── PayoffExpr::parse        (fail fast on invalid payoffs)
//! ├── PricerRng                (seeded or entropy-seeded, one per call)
//! ├── sample_terminal_prices   (exact GBM terminal draw per path)
//! └── Aggregation
//!     ├── PayoffExpr::evaluate (vectorised over all paths)
//!     ├── discount by exp(-rT)
//!     └── mean and standard error
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::PricingInput;
//! use pricer_pricing::mc::price_option;
//!
//! let input = PricingInput::new(100.0, 0.01, 0.2, 1.0, 10_000, "maximum(ST - 100, 0)").unwrap();
//! let result = price_option(&input, Some(42)).unwrap();
//!
//! println!(
//!     "Price: {:.4} +/- {:.4}",
//!     result.price,
//!     result.confidence_95()
//! );
//! ```

pub mod error;
pub mod pricer;
pub mod sampler;

pub use error::PricingError;
pub use pricer::{price_option, price_with_source, PricingResult};
pub use sampler::{sample_terminal_prices, GbmParams};
