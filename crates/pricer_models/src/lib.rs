//! # Pricer Models (L2: Business Logic)
//!
//! Payoff expressions and closed-form reference prices.
//!
//! This crate provides:
//! - A restricted payoff expression language over the terminal price `ST`,
//!   parsed and validated before evaluation and evaluated vectorised over
//!   the simulated price vector
//! - Black-Scholes closed-form prices for validating Monte Carlo estimates
//!
//! ## Design Principles
//!
//! - **Parse, then evaluate**: names are resolved against an allow-list at
//!   parse time, so an accepted expression cannot reach anything but `ST`
//!   and elementwise maths
//! - **Independent of the sampler**: the evaluator only sees a `&[f64]`
//! - **Generic over `T: Float`** for the analytical formulas

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod payoff;
