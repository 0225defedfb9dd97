//! Straight-line fitting kernel.
//!
//! Responsibilities:
//!
//! - extract the set of indices a fit is computable on (`points`)
//! - weighted least squares for 0 or 1 uncertain dimensions (`wls`)
//! - iterative χ² minimization when both coordinates are uncertain
//!   (`minimizer`)
//! - quadratic-surface parameter errors for the both-errors case
//!   (`quadratic`)
//! - strategy selection and result access (`engine`)

pub mod engine;
pub mod minimizer;
pub mod points;
pub mod quadratic;
pub mod wls;

pub use engine::*;
pub use points::*;
