//! Calculation logic for the managerial-accounting waterfall.
//!
//! [`compute`] turns inputs into results; [`compare`] lines current results
//! up against a frozen baseline.

pub mod common;
pub mod comparison;
pub mod waterfall;

pub use comparison::{ComparisonRow, Emphasis, compare};
pub use waterfall::{OverflowError, compute, try_compute};
