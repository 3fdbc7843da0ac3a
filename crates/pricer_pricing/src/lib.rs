//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns a validated [`PricingInput`] into a price:
//! - Seeded random number generation ([`rng`])
//! - Exact terminal price sampling under risk-neutral GBM ([`mc::sampler`])
//! - Payoff evaluation, discounting and averaging ([`mc::pricer`])
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `PricingInput`, `InputError`
//! - Layer 2 (pricer_models): `PayoffExpr`, `InvalidExpression`
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::PricingInput;
//! use pricer_pricing::price_option;
//!
//! let input = PricingInput::new(100.0, 0.01, 0.2, 1.0, 10_000, "maximum(ST - 100, 0)").unwrap();
//! let (price, terminal_prices) = price_option(&input, Some(42)).unwrap().into_parts();
//!
//! assert_eq!(terminal_prices.len(), 10_000);
//! assert!((price - 8.43).abs() < 1.0);
//! ```
//!
//! [`PricingInput`]: pricer_core::types::PricingInput

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{price_option, GbmParams, PricingError, PricingResult};
