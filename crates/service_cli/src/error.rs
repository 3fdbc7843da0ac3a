//! CLI error types
//!
//! Display output is the user-facing message printed before a non-zero exit.

use pricer_core::types::InputError;
use pricer_models::payoff::InvalidExpression;
use pricer_pricing::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input or payoff rejected
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Report could not be serialised
    #[error("Failed to serialise report: {0}")]
    Serialisation(#[from] serde_json::Error),
}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        Self::Pricing(err.into())
    }
}

impl From<InvalidExpression> for CliError {
    fn from(err: InvalidExpression) -> Self {
        Self::Pricing(err.into())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::payoff::PayoffExpr;

    #[test]
    fn test_messages_are_user_facing() {
        let err = CliError::from(InputError::NonPositiveSpot { spot: -1.0 });
        assert_eq!(err.to_string(), "Spot price must be positive.");

        let err = CliError::from(PayoffExpr::parse("os").unwrap_err());
        assert!(err.to_string().starts_with("Invalid payoff expression: "));

        let err = CliError::from(ConfigError::InvalidFormat("xml".to_string()));
        assert!(err.to_string().contains("xml"));
    }
}
