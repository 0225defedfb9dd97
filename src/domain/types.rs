//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A measured coordinate axis.
///
/// Each dimension has an associated error dimension (its per-point
/// uncertainty column). The fitting logic is written against slices of
/// dimensions so it generalizes beyond the two used in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    X,
    Y,
}

/// All measured dimensions, in column order.
pub const DIMENSIONS: [Dimension; 2] = [Dimension::X, Dimension::Y];

/// Which uncertainty dimensions are weighted into the regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FitType {
    /// No uncertainties used; unit weights.
    None,
    /// Ordinary regression, unit weights.
    Regular,
    /// Weight by x uncertainties (`w = 1/err_x²`).
    XError,
    /// Weight by y uncertainties (`w = 1/err_y²`).
    YError,
    /// Both coordinates uncertain; effective variance `err_y² + m²·err_x²`.
    BothErrors,
}

impl FitType {
    /// Error dimensions a point must carry to participate in this fit.
    pub fn required_error_dims(self) -> &'static [Dimension] {
        match self {
            FitType::None | FitType::Regular => &[],
            FitType::XError => &[Dimension::X],
            FitType::YError => &[Dimension::Y],
            FitType::BothErrors => &[Dimension::X, Dimension::Y],
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            FitType::None => "none",
            FitType::Regular => "regular",
            FitType::XError => "x-error",
            FitType::YError => "y-error",
            FitType::BothErrors => "both-errors",
        }
    }
}

/// How the fit type is chosen on the command line.
///
/// `Auto` means: infer from which error columns actually carry data
/// (both → both-errors, y only → y-error, x only → x-error, none → regular).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    Auto,
    None,
    Regular,
    XError,
    YError,
    BothErrors,
}

impl std::fmt::Display for FitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FitMode::Auto => "auto",
            FitMode::None => "none",
            FitMode::Regular => "regular",
            FitMode::XError => "x-error",
            FitMode::YError => "y-error",
            FitMode::BothErrors => "both-errors",
        };
        f.write_str(s)
    }
}

impl FitMode {
    pub fn to_fit_type(self) -> Option<FitType> {
        match self {
            FitMode::Auto => None,
            FitMode::None => Some(FitType::None),
            FitMode::Regular => Some(FitType::Regular),
            FitMode::XError => Some(FitType::XError),
            FitMode::YError => Some(FitType::YError),
            FitMode::BothErrors => Some(FitType::BothErrors),
        }
    }
}

/// A line parameter pinned to a caller-supplied value instead of solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedVariable {
    None,
    Slope,
    Intercept,
}

/// The full fit configuration: fit type + optional pinned parameter.
///
/// Whether a pin is actually honored depends on the active strategy's
/// capability flags (see `fit::engine::STRATEGIES`); an unsupported request
/// is recorded here regardless and has no numerical effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSpec {
    pub fit_type: FitType,
    pub fixed: FixedVariable,
    pub fixed_value: f64,
}

impl FitSpec {
    /// A spec with nothing pinned.
    pub fn free(fit_type: FitType) -> Self {
        Self {
            fit_type,
            fixed: FixedVariable::None,
            fixed_value: 0.0,
        }
    }

    pub fn fixed_slope(&self) -> Option<f64> {
        match self.fixed {
            FixedVariable::Slope => Some(self.fixed_value),
            _ => None,
        }
    }

    pub fn fixed_intercept(&self) -> Option<f64> {
        match self.fixed {
            FixedVariable::Intercept => Some(self.fixed_value),
            _ => None,
        }
    }

    /// Number of parameters actually solved for (for χ²/dof reporting).
    pub fn free_param_count(&self) -> usize {
        match self.fixed {
            FixedVariable::None => 2,
            FixedVariable::Slope | FixedVariable::Intercept => 1,
        }
    }
}

/// Which strategy handles the both-errors case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Iterative χ² minimizer (fixed 50-iteration parabolic search).
    Minimizer,
    /// Local quadratic surface around the minimizer's seed.
    Quadratic,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StrategyKind::Minimizer => "minimizer",
            StrategyKind::Quadratic => "quadratic",
        };
        f.write_str(s)
    }
}

/// An immutable snapshot of one valid measurement.
///
/// Strategies operate on slices of these instead of holding a reference back
/// into the dataset; the snapshot is rebuilt on every refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPoint {
    /// Row index in the source columns.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub err_x: Option<f64>,
    pub err_y: Option<f64>,
}

/// Fitted line parameters, their uncertainties, and goodness of fit.
///
/// Degenerate inputs (zero x spread, Δ = 0) produce NaN/∞ fields rather than
/// an error; consumers treat non-finite values as "fit undefined".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub slope_error: f64,
    pub intercept_error: f64,
    pub chi_squared: f64,
}

impl FitResult {
    /// Evaluate the fitted line at `x`.
    pub fn y_of_x(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Invert the fitted line at `y`.
    pub fn x_of_y(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }
}

/// Summary stats about the points actually available for fitting.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A full fit run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub fit_mode: FitMode,
    pub strategy: StrategyKind,
    pub fixed: FixedVariable,
    pub fixed_value: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_line: Option<PathBuf>,
}

/// Configuration for synthetic sample generation (`linefit sample`).
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out_path: PathBuf,
    pub count: usize,
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
    /// Per-point x uncertainty magnitude; `None` omits the err_x column.
    pub err_x: Option<f64>,
    /// Per-point y uncertainty magnitude; `None` omits the err_y column.
    pub err_y: Option<f64>,
    pub seed: u64,
}

/// A saved fitted-line file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFile {
    pub tool: String,
    pub fit_type: FitType,
    pub strategy: StrategyKind,
    pub spec: FitSpec,
    pub result: FitResult,
    pub n_points: usize,
    pub grid: LineGrid,
}

/// A precomputed fitted grid for quick plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
