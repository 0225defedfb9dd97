//! Dataset storage and synthetic data generation.
//!
//! - sparse nullable measurement columns (`columns`)
//! - deterministic synthetic sample generation (`sample`)

pub mod columns;
pub mod sample;

pub use columns::*;
pub use sample::*;
