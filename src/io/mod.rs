//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - per-point result exports (`export`)
//! - fitted-line JSON read/write (`line`)

pub mod export;
pub mod ingest;
pub mod line;

pub use export::*;
pub use ingest::*;
pub use line::*;
