//! Quadratic-surface error approximation for the both-errors case.
//!
//! Instead of trusting the minimizer's weighted-sum error formulas, this
//! strategy samples the χ² surface around the minimizer's solution and fits
//! a local quadratic model:
//!
//! ```text
//! χ²(m, b) ≈ c + d_m·Δm + d_b·Δb + β·Δm² + α·Δb² + 2γ·Δm·Δb
//! ```
//!
//! Six samples (center, ±σm, ±σb, one diagonal) determine the six
//! coefficients in closed form. The model's minimum also yields a corrected
//! `(m, b)`, adopted whenever the model *predicts* an improvement over the
//! seed's actual χ². The prediction is taken at face value: on an asymmetric
//! surface the adopted point's actual χ² can come out higher than the seed's.
//!
//! This strategy cannot pin slope or intercept. Its seed strategy can, but
//! the surface sampling assumes both parameters are free; the restriction is
//! deliberate and is surfaced through the capability flags in
//! `fit::engine::STRATEGIES`.

use crate::domain::{FitPoint, FitResult, FitSpec, FitType};
use crate::fit::minimizer;

/// Fit a line when both coordinates carry uncertainty, with quadratic-model
/// parameter errors.
///
/// Any pinned parameter in the caller's spec is ignored here; the engine
/// warns about the unsupported request before dispatching.
pub fn fit(points: &[FitPoint]) -> FitResult {
    let seed = minimizer::fit(points, &FitSpec::free(FitType::BothErrors));
    let (m0, b0) = (seed.slope, seed.intercept);
    let (sm, sb) = (seed.slope_error, seed.intercept_error);

    let chi = |m: f64, b: f64| minimizer::chi_squared(m, b, points);

    // Six samples of the surface.
    let c0 = chi(m0, b0);
    let c_mp = chi(m0 + sm, b0);
    let c_mm = chi(m0 - sm, b0);
    let c_bp = chi(m0, b0 + sb);
    let c_bm = chi(m0, b0 - sb);
    let c_diag = chi(m0 + sm, b0 + sb);

    // Closed-form coefficients from the sampled differences.
    let beta = (c_mp + c_mm - 2.0 * c0) / (2.0 * sm * sm);
    let d_m = (c_mp - c_mm) / (2.0 * sm);
    let alpha = (c_bp + c_bm - 2.0 * c0) / (2.0 * sb * sb);
    let d_b = (c_bp - c_bm) / (2.0 * sb);
    let gamma =
        (c_diag - c0 - d_m * sm - d_b * sb - beta * sm * sm - alpha * sb * sb) / (2.0 * sm * sb);

    // Stationary point of the model, relative to the seed.
    let det = alpha * beta - gamma * gamma;
    let dm = (d_b * gamma - d_m * alpha) / (2.0 * det);
    let db = (d_m * gamma - d_b * beta) / (2.0 * det);

    let predicted = c0
        + d_m * dm
        + d_b * db
        + beta * dm * dm
        + alpha * db * db
        + 2.0 * gamma * dm * db;

    // Keep the seed only when its actual χ² beats the model's prediction.
    let (slope, intercept) = if c0 < predicted {
        (m0, b0)
    } else {
        (m0 + dm, b0 + db)
    };

    FitResult {
        slope,
        intercept,
        slope_error: alpha / det,
        intercept_error: beta / det,
        chi_squared: chi(slope, intercept),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_points() -> Vec<FitPoint> {
        [
            (1.0, 2.1, 0.1, 0.2),
            (2.0, 3.9, 0.1, 0.2),
            (3.0, 6.2, 0.1, 0.2),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(x, y, ex, ey))| FitPoint {
            index: i,
            x,
            y,
            err_x: Some(ex),
            err_y: Some(ey),
        })
        .collect()
    }

    #[test]
    fn stays_near_the_minimizer_solution() {
        let points = reference_points();
        let result = fit(&points);

        // The correction step never moves far from the seed; both solutions
        // sit inside the sanity bounds for this dataset.
        assert!(result.slope > 1.8 && result.slope < 2.2);
        assert!(result.intercept > -0.5 && result.intercept < 0.5);
    }

    #[test]
    fn adopts_the_model_minimum_when_it_predicts_improvement() {
        // On this dataset the minimizer's seed already sits at the true χ²
        // minimum, but the σ²(m)-weighted surface is asymmetric around it,
        // so the local model carries a large linear slope term and predicts
        // a lower minimum off to the side. The adopt-or-keep rule compares
        // the seed's actual χ² against that prediction, so the corrected
        // point is adopted even though its actual χ² is higher.
        let points = reference_points();
        let seed = minimizer::fit(&points, &FitSpec::free(FitType::BothErrors));
        let result = fit(&points);

        assert!((result.slope - 2.08206).abs() < 1e-3, "slope = {}", result.slope);
        assert!(
            (result.intercept - (-0.08950)).abs() < 1e-3,
            "intercept = {}",
            result.intercept
        );
        assert!(
            (result.chi_squared - 0.52684).abs() < 1e-3,
            "chi² = {}",
            result.chi_squared
        );
        assert!(result.chi_squared > seed.chi_squared);
    }

    #[test]
    fn errors_come_from_the_local_surface() {
        let points = reference_points();
        let result = fit(&points);

        assert!(result.slope_error.is_finite() && result.slope_error > 0.0);
        assert!(result.intercept_error.is_finite() && result.intercept_error > 0.0);
    }
}
