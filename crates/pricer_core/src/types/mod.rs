//! Pricing input types and their validation errors.
//!
//! This module provides:
//! - `input`: The validated [`PricingInput`] value type and field defaults
//! - `error`: [`InputError`] for conversion and invariant failures

pub mod error;
pub mod input;

pub use error::InputError;
pub use input::{defaults, PricingInput, MAX_LOG_GROWTH};
