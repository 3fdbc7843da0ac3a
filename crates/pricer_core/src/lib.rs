//! # pricer_core: Input Foundation for the Monte Carlo Payoff Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - The validated pricing input: `PricingInput` (`types::input`)
//! - Field defaults used by form-style front ends (`types::input::defaults`)
//! - Input error types: `InputError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derive
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{InputError, PricingInput};
//!
//! let input = PricingInput::new(100.0, 0.01, 0.2, 1.0, 10_000, "maximum(ST - 100, 0)").unwrap();
//! assert!((input.discount_factor() - (-0.01_f64).exp()).abs() < 1e-15);
//!
//! let err = PricingInput::new(100.0, 0.01, 0.2, 1.0, 10_000, "   ").unwrap_err();
//! assert_eq!(err, InputError::EmptyPayoff);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `PricingInput`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
