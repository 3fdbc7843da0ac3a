//! Validate command implementation
//!
//! Parses a payoff expression without simulating anything.

use pricer_models::payoff::PayoffExpr;
use tracing::info;

use crate::Result;

/// Run the validate command
pub fn run(payoff: &str) -> Result<()> {
    let message = check(payoff)?;
    println!("{message}");
    Ok(())
}

/// Parse `payoff` and describe the outcome
pub fn check(payoff: &str) -> Result<String> {
    let expr = PayoffExpr::parse(payoff)?;
    info!(expression = %expr, "payoff expression accepted");
    Ok(format!("Payoff expression is valid: {expr}"))
}
