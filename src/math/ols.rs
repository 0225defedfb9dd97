//! Weighted least squares solver for the two-parameter line design.
//!
//! The free (nothing pinned) regression solves:
//!
//! ```text
//! minimize Σ w_i (y_i - b - m x_i)^2
//! ```
//!
//! Implementation choices:
//! - We scale rows by `sqrt(w_i)` and solve an ordinary least squares problem
//!   over the `[1, x]` design.
//! - We use SVD to solve the least-squares problem robustly even when the
//!   design matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for non-square matrices.)
//! - The parameter dimension is 2, so SVD cost is negligible next to building
//!   the matrix.
//!
//! This is numerically equivalent to the closed-form weighted normal
//! equations. A rank-deficient design (zero x spread) still yields the
//! minimum-norm solution; its parameter errors blow up downstream through
//! `Δ = 0`, which is how callers detect an undefined fit.

use nalgebra::{DMatrix, DVector};

/// Solve the weighted line fit `y ≈ b + m·x`.
///
/// Returns `(slope, intercept)`, or `None` if the system is too
/// ill-conditioned to solve robustly.
pub fn solve_weighted_line(xs: &[f64], ys: &[f64], weights: &[f64]) -> Option<(f64, f64)> {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert_eq!(xs.len(), weights.len());

    let n = xs.len();
    if n < 2 {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(n, 2);
    let mut rhs = DVector::<f64>::zeros(n);
    for i in 0..n {
        let sw = weights[i].sqrt();
        design[(i, 0)] = sw;
        design[(i, 1)] = xs[i] * sw;
        rhs[i] = ys[i] * sw;
    }

    let svd = design.svd(true, true);

    // Try progressively looser tolerances if the strict solve fails; near-zero
    // x spread produces nearly collinear columns.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(&rhs, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some((beta[1], beta[0]));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_simple_unweighted_line() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let xs = [0.0, 1.0, 2.0];
        let ys = [2.0, 5.0, 8.0];
        let w = [1.0, 1.0, 1.0];

        let (m, b) = solve_weighted_line(&xs, &ys, &w).unwrap();
        assert!((m - 3.0).abs() < 1e-10);
        assert!((b - 2.0).abs() < 1e-10);
    }

    #[test]
    fn weights_pull_the_line_toward_heavy_points() {
        // Two clusters on different lines; the heavily weighted pair wins.
        let xs = [0.0, 1.0, 0.0, 1.0];
        let ys = [0.0, 1.0, 10.0, 10.0];
        let w = [1e6, 1e6, 1e-6, 1e-6];

        let (m, b) = solve_weighted_line(&xs, &ys, &w).unwrap();
        assert!((m - 1.0).abs() < 1e-3);
        assert!(b.abs() < 1e-3);
    }
}
