//! Weighted least squares for 0 or 1 uncertain dimensions.
//!
//! This is the shared base routine: it handles the `none`, `regular`,
//! `x-error` and `y-error` fit types directly, and seeds the both-errors
//! minimizer. Per point the weight is `1/σ²` where σ is the uncertainty
//! relevant to the fit type, or 1 when the fit type uses no uncertainty.
//!
//! Degenerate inputs are not guarded: `Δ = 0` produces infinite parameter
//! errors and a rank-deficient design produces the minimum-norm line, both of
//! which consumers treat as "fit undefined".

use crate::domain::{FitPoint, FitSpec, FitType, FixedVariable};
use crate::math::solve_weighted_line;

/// Line parameters and their uncertainties from a single WLS pass.
#[derive(Debug, Clone, Copy)]
pub struct LineEstimate {
    pub slope: f64,
    pub intercept: f64,
    pub slope_error: f64,
    pub intercept_error: f64,
}

/// Accumulated weighted sums over a point snapshot.
///
/// All the closed-form parameter, error, and χ² expressions are combinations
/// of these six sums, so we accumulate them once per pass.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WeightedSums {
    pub sw: f64,
    pub swx: f64,
    pub swy: f64,
    pub swxx: f64,
    pub swxy: f64,
    pub swyy: f64,
}

impl WeightedSums {
    pub(crate) fn accumulate<F>(points: &[FitPoint], weight_of: F) -> Self
    where
        F: Fn(&FitPoint) -> f64,
    {
        let mut s = WeightedSums::default();
        for p in points {
            let w = weight_of(p);
            s.sw += w;
            s.swx += w * p.x;
            s.swy += w * p.y;
            s.swxx += w * p.x * p.x;
            s.swxy += w * p.x * p.y;
            s.swyy += w * p.y * p.y;
        }
        s
    }

    /// `Δ = Σw·Σwx² − (Σwx)²`, the denominator of both error formulas.
    pub(crate) fn delta(&self) -> f64 {
        self.sw * self.swxx - self.swx * self.swx
    }

    /// χ² via the expanded quadratic form.
    ///
    /// Mathematically identical to `Σ w (y − m·x − b)²` but reusable across
    /// many (m, b) evaluations without another pass over the points.
    pub(crate) fn chi_squared(&self, slope: f64, intercept: f64) -> f64 {
        self.swyy - 2.0 * slope * self.swxy - 2.0 * intercept * self.swy
            + slope * slope * self.swxx
            + 2.0 * slope * intercept * self.swx
            + intercept * intercept * self.sw
    }
}

/// The weight of one point under a given fit type.
pub(crate) fn point_weight(p: &FitPoint, fit_type: FitType) -> f64 {
    let sigma = match fit_type {
        FitType::YError => p.err_y,
        FitType::XError => p.err_x,
        _ => None,
    };
    match sigma {
        Some(s) if s != 0.0 => 1.0 / (s * s),
        _ => 1.0,
    }
}

/// Fit a line to the snapshot under `fit_type` weighting.
///
/// `spec.fixed` pins slope or intercept; the pinned parameter's error is 0.
pub fn fit(points: &[FitPoint], fit_type: FitType, spec: &FitSpec) -> LineEstimate {
    let sums = WeightedSums::accumulate(points, |p| point_weight(p, fit_type));
    let delta = sums.delta();

    let (slope, intercept) = match spec.fixed {
        FixedVariable::Slope => {
            let m = spec.fixed_value;
            (m, (sums.swy - m * sums.swx) / sums.sw)
        }
        FixedVariable::Intercept => {
            let b = spec.fixed_value;
            ((sums.swxy - b * sums.swx) / sums.swxx, b)
        }
        FixedVariable::None => {
            let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
            let ws: Vec<f64> = points.iter().map(|p| point_weight(p, fit_type)).collect();
            solve_weighted_line(&xs, &ys, &ws).unwrap_or((f64::NAN, f64::NAN))
        }
    };

    let mut slope_error = (sums.sw / delta).sqrt();
    let mut intercept_error = (sums.swxx / delta).sqrt();

    // x-domain variance expressed in slope-domain units.
    if fit_type == FitType::XError {
        slope_error *= slope;
        intercept_error *= slope;
    }

    match spec.fixed {
        FixedVariable::Slope => slope_error = 0.0,
        FixedVariable::Intercept => intercept_error = 0.0,
        FixedVariable::None => {}
    }

    LineEstimate {
        slope,
        intercept,
        slope_error,
        intercept_error,
    }
}

/// χ² of a candidate line over the snapshot under `fit_type` weighting.
pub fn chi_squared(slope: f64, intercept: f64, points: &[FitPoint], fit_type: FitType) -> f64 {
    WeightedSums::accumulate(points, |p| point_weight(p, fit_type)).chi_squared(slope, intercept)
}
