//! Analytical pricing formulas for European claims.
//!
//! Closed-form Black-Scholes prices used as reference values for the Monte
//! Carlo engine:
//! - Vanilla call and put
//! - Cash-or-nothing digital call and put
//! - Forward and discounted forward
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports both `f64` and `f32`
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
