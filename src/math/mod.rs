//! Mathematical utilities: weighted least squares for the line design.

pub mod ols;

pub use ols::*;
