//! Export per-point fit results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per fitted point with its residual and pull.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitPoint, FitResult};
use crate::error::AppError;

/// Residual divided by the point's effective uncertainty at the fitted
/// slope, or `None` when the point carries no uncertainty at all.
pub fn pull(point: &FitPoint, result: &FitResult) -> Option<f64> {
    let ey = point.err_y.unwrap_or(0.0);
    let ex = point.err_x.unwrap_or(0.0);
    let var = ey * ey + result.slope * result.slope * ex * ex;
    if var > 0.0 {
        Some((point.y - result.y_of_x(point.x)) / var.sqrt())
    } else {
        None
    }
}

/// Write per-point results to a CSV file.
pub fn write_results_csv(
    path: &Path,
    points: &[FitPoint],
    result: &FitResult,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "index,x,y,err_x,err_y,y_fit,residual,pull")
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        let y_fit = result.y_of_x(p.x);
        writeln!(
            file,
            "{},{:.10},{:.10},{},{},{:.10},{:.10},{}",
            p.index,
            p.x,
            p.y,
            p.err_x.map(|v| format!("{v:.10}")).unwrap_or_default(),
            p.err_y.map(|v| format!("{v:.10}")).unwrap_or_default(),
            y_fit,
            p.y - y_fit,
            pull(p, result).map(|v| format!("{v:.6}")).unwrap_or_default(),
        )
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a generated sample to CSV with the schema `ingest` reads back.
pub fn write_sample_csv(
    path: &Path,
    rows: &[crate::data::SampleRow],
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create sample CSV '{}': {e}", path.display()))
    })?;

    let has_err_x = rows.iter().any(|r| r.err_x.is_some());
    let has_err_y = rows.iter().any(|r| r.err_y.is_some());

    let mut header = String::from("x,y");
    if has_err_x {
        header.push_str(",err_x");
    }
    if has_err_y {
        header.push_str(",err_y");
    }
    writeln!(file, "{header}")
        .map_err(|e| AppError::new(4, format!("Failed to write sample CSV header: {e}")))?;

    for r in rows {
        let mut line = format!("{:.10},{:.10}", r.x, r.y);
        if has_err_x {
            line.push(',');
            if let Some(e) = r.err_x {
                line.push_str(&format!("{e:.10}"));
            }
        }
        if has_err_y {
            line.push(',');
            if let Some(e) = r.err_y {
                line.push_str(&format!("{e:.10}"));
            }
        }
        writeln!(file, "{line}")
            .map_err(|e| AppError::new(4, format!("Failed to write sample CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_uses_effective_uncertainty() {
        let result = FitResult {
            slope: 2.0,
            intercept: 0.0,
            slope_error: 0.0,
            intercept_error: 0.0,
            chi_squared: 0.0,
        };
        let p = FitPoint {
            index: 0,
            x: 1.0,
            y: 2.5,
            err_x: None,
            err_y: Some(0.5),
        };

        // Residual 0.5 over σ = 0.5.
        assert!((pull(&p, &result).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pull_is_absent_without_uncertainties() {
        let result = FitResult {
            slope: 1.0,
            intercept: 0.0,
            slope_error: 0.0,
            intercept_error: 0.0,
            chi_squared: 0.0,
        };
        let p = FitPoint {
            index: 0,
            x: 1.0,
            y: 1.5,
            err_x: None,
            err_y: None,
        };

        assert!(pull(&p, &result).is_none());
    }
}
