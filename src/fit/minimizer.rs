//! Iterative χ² minimizer for the both-errors case.
//!
//! When both coordinates carry uncertainty, each point's effective variance
//! depends on the slope:
//!
//! ```text
//! σ²(m) = err_y² + m²·err_x²
//! ```
//!
//! which makes the objective nonlinear in `m`. The minimizer seeds from a
//! y-error-only WLS pass, then runs a fixed-count parabolic line search on
//! the slope, pairing every candidate slope with its own best intercept.
//!
//! The loop runs exactly [`ITERATIONS`] times with a bracket that starts at
//! [`SCOPE_FACTOR`]·slope_error and shrinks by [`SCOPE_SHRINK`] per
//! iteration; there is no convergence check. These constants are pinned by
//! golden tests; do not retune them without revisiting those.

use crate::domain::{FitPoint, FitResult, FitSpec, FitType, FixedVariable};
use crate::fit::wls::{self, WeightedSums};

/// Fixed iteration count of the parabolic search.
pub const ITERATIONS: usize = 50;
/// Initial bracket half-width as a multiple of the seed slope error.
pub const SCOPE_FACTOR: f64 = 10.0;
/// Bracket shrink divisor applied after each iteration.
pub const SCOPE_SHRINK: f64 = 1.2;

/// Effective variance of one point at slope `m`.
///
/// Points reaching this strategy always carry both errors (the valid-point
/// filter guarantees it); a missing value contributes zero variance.
fn effective_variance(p: &FitPoint, slope: f64) -> f64 {
    let ey = p.err_y.unwrap_or(0.0);
    let ex = p.err_x.unwrap_or(0.0);
    ey * ey + slope * slope * ex * ex
}

fn sums_at(points: &[FitPoint], slope: f64) -> WeightedSums {
    WeightedSums::accumulate(points, |p| 1.0 / effective_variance(p, slope))
}

/// Best intercept for a given slope under `σ²(m)` weighting.
pub fn intercept_for(slope: f64, points: &[FitPoint]) -> f64 {
    let s = sums_at(points, slope);
    (s.swy - slope * s.swx) / s.sw
}

/// χ² of a candidate line under `σ²(m)` weighting.
pub fn chi_squared(slope: f64, intercept: f64, points: &[FitPoint]) -> f64 {
    sums_at(points, slope).chi_squared(slope, intercept)
}

/// χ² at slope `m`, paired with its best (or pinned) intercept.
fn chi_at(slope: f64, points: &[FitPoint], spec: &FitSpec) -> f64 {
    let intercept = spec
        .fixed_intercept()
        .unwrap_or_else(|| intercept_for(slope, points));
    chi_squared(slope, intercept, points)
}

/// One 3-point parabolic-minimum update centered on `m2`.
fn parabolic_step(m1: f64, m2: f64, m3: f64, c1: f64, c2: f64, c3: f64) -> f64 {
    let num = (m2 - m1).powi(2) * (c2 - c3) - (m2 - m3).powi(2) * (c2 - c1);
    let den = (m2 - m1) * (c2 - c3) - (m2 - m3) * (c2 - c1);
    // A flat or symmetric bracket makes this 0/0; the NaN propagates into the
    // result per the kernel's no-guard policy.
    m2 - 0.5 * num / den
}

/// Fit a line when both coordinates carry uncertainty.
pub fn fit(points: &[FitPoint], spec: &FitSpec) -> FitResult {
    let seed = wls::fit(points, FitType::YError, spec);
    let mut slope = seed.slope;

    if spec.fixed_slope().is_none() {
        let mut scope = SCOPE_FACTOR * seed.slope_error;
        for _ in 0..ITERATIONS {
            let (m1, m2, m3) = (slope - scope, slope, slope + scope);
            let c1 = chi_at(m1, points, spec);
            let c2 = chi_at(m2, points, spec);
            let c3 = chi_at(m3, points, spec);
            slope = parabolic_step(m1, m2, m3, c1, c2, c3);
            scope /= SCOPE_SHRINK;
        }
    }

    let intercept = spec
        .fixed_intercept()
        .unwrap_or_else(|| intercept_for(slope, points));

    let sums = sums_at(points, slope);
    let delta = sums.delta();
    let slope_error = match spec.fixed {
        FixedVariable::Slope => 0.0,
        _ => (sums.sw / delta).sqrt(),
    };
    let intercept_error = match spec.fixed {
        FixedVariable::Intercept => 0.0,
        _ => (sums.swxx / delta).sqrt(),
    };

    FitResult {
        slope,
        intercept,
        slope_error,
        intercept_error,
        chi_squared: sums.chi_squared(slope, intercept),
    }
}
