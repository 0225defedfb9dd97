//! `linefit` library crate.
//!
//! The binary (`linefit`) is a thin wrapper around this library so that:
//!
//! - the fitting kernel is testable without spawning processes
//! - modules are reusable (e.g., future GUI front ends or notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
