//! Error types at the pricing boundary.
//!
//! The engine itself only fails on an invalid payoff expression; input
//! validation happens earlier, when the [`PricingInput`] is built. Front ends
//! that do both steps use [`PricingError`] so `?` works across them while the
//! two failure kinds stay distinguishable.
//!
//! [`PricingInput`]: pricer_core::types::PricingInput

use pricer_core::types::InputError;
use pricer_models::payoff::InvalidExpression;
use thiserror::Error;

/// Failure of a pricing request, from raw input to price.
///
/// Display is the user-facing message of the wrapped error.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::InputError;
/// use pricer_pricing::mc::PricingError;
///
/// let err = PricingError::from(InputError::EmptyPayoff);
/// assert!(err.is_invalid_input());
/// assert_eq!(err.to_string(), "Payoff expression cannot be empty.");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Input failed conversion or validation; nothing was simulated.
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// The payoff expression was rejected; nothing was simulated.
    #[error(transparent)]
    InvalidExpression(#[from] InvalidExpression),
}

impl PricingError {
    /// Returns `true` for input conversion or validation failures.
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` for rejected payoff expressions.
    #[inline]
    pub fn is_invalid_expression(&self) -> bool {
        matches!(self, Self::InvalidExpression(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::payoff::PayoffExpr;

    #[test]
    fn test_input_error_conversion() {
        let err: PricingError = InputError::NoSimulations.into();
        assert!(err.is_invalid_input());
        assert!(!err.is_invalid_expression());
        assert_eq!(err.to_string(), "Simulations must be a positive integer.");
    }

    #[test]
    fn test_expression_error_conversion() {
        let err: PricingError = PayoffExpr::parse("os").unwrap_err().into();
        assert!(err.is_invalid_expression());
        assert!(err.to_string().starts_with("Invalid payoff expression: "));
    }
}
