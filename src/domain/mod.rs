//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - measurement dimensions and fit configuration enums (`Dimension`,
//!   `FitType`, `FixedVariable`, `StrategyKind`)
//! - the immutable point snapshot handed to fit strategies (`FitPoint`)
//! - fit outputs (`FitResult`)
//! - run configuration (`FitConfig`, `SampleConfig`)

pub mod types;

pub use types::*;
