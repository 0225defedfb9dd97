//! Command-line parsing for the line fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{FitMode, StrategyKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "linefit", version, about = "Straight-line fitting with per-point uncertainties")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a line to a measurement CSV and print diagnostics.
    Fit(FitArgs),
    /// Generate a synthetic measurement CSV around a known line.
    Sample(SampleArgs),
    /// Plot a previously exported line JSON.
    Plot(PlotArgs),
}

/// Options for `linefit fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Measurement CSV (columns: x, y, optional err_x/err_y).
    pub csv: PathBuf,

    /// Which uncertainty dimensions to weight into the regression.
    #[arg(short = 'f', long, value_enum, default_value_t = FitMode::Auto)]
    pub fit: FitMode,

    /// Strategy for the both-errors case.
    #[arg(short = 's', long, value_enum, default_value_t = StrategyKind::Minimizer)]
    pub strategy: StrategyKind,

    /// Pin the slope to this value instead of solving for it.
    #[arg(long, conflicts_with = "fix_intercept")]
    pub fix_slope: Option<f64>,

    /// Pin the intercept to this value instead of solving for it.
    #[arg(long, conflicts_with = "fix_slope")]
    pub fix_intercept: Option<f64>,

    /// Render an ASCII plot of the points and fitted line.
    #[arg(short = 'p', long, default_value_t = false)]
    pub plot: bool,

    /// Plot width in characters.
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height in characters.
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-point results to this CSV path.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted line (with a plotting grid) to this JSON path.
    #[arg(long)]
    pub export_line: Option<PathBuf>,
}

/// Options for `linefit sample`.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    pub out: PathBuf,

    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 25)]
    pub count: usize,

    /// True slope of the generated line.
    #[arg(short = 'm', long, default_value_t = 2.0)]
    pub slope: f64,

    /// True intercept of the generated line.
    #[arg(short = 'b', long, default_value_t = 0.0)]
    pub intercept: f64,

    /// Smallest true x.
    #[arg(long, default_value_t = 0.0)]
    pub x_min: f64,

    /// Largest true x.
    #[arg(long, default_value_t = 10.0)]
    pub x_max: f64,

    /// Per-point x uncertainty magnitude (omit for no err_x column).
    #[arg(long)]
    pub err_x: Option<f64>,

    /// Per-point y uncertainty magnitude (omit for no err_y column).
    #[arg(long)]
    pub err_y: Option<f64>,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for `linefit plot`.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Line JSON produced by `linefit fit --export-line`.
    pub line: PathBuf,

    /// Plot width in characters.
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height in characters.
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
