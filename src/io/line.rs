//! Read/write fitted-line JSON files.
//!
//! Line JSON is the "portable" representation of a fit:
//! - fit type, strategy, and fixed-parameter spec
//! - the numeric `FitResult`
//! - a precomputed grid for quick plotting
//!
//! The schema is defined by `domain::LineFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{FitResult, FitSpec, LineFile, LineGrid, StrategyKind};
use crate::error::AppError;

/// Write a fitted-line JSON file.
pub fn write_line_json(
    path: &Path,
    result: &FitResult,
    spec: &FitSpec,
    strategy: StrategyKind,
    n_points: usize,
    x_min: f64,
    x_max: f64,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create line JSON '{}': {e}", path.display()))
    })?;

    let (x, y) = build_grid(result, x_min, x_max, 101);
    let line = LineFile {
        tool: "linefit".to_string(),
        fit_type: spec.fit_type,
        strategy,
        spec: *spec,
        result: *result,
        n_points,
        grid: LineGrid { x, y },
    };

    serde_json::to_writer_pretty(file, &line)
        .map_err(|e| AppError::new(4, format!("Failed to write line JSON: {e}")))?;

    Ok(())
}

/// Read a fitted-line JSON file.
pub fn read_line_json(path: &Path) -> Result<LineFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open line JSON '{}': {e}", path.display()))
    })?;
    let line: LineFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid line JSON: {e}")))?;
    Ok(line)
}

fn build_grid(result: &FitResult, x_min: f64, x_max: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let n = n.max(2);
    let mut x0 = x_min;
    let mut x1 = x_max;
    if !(x0.is_finite() && x1.is_finite()) || x1 <= x0 {
        x0 = 0.0;
        x1 = 1.0;
    }

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x0 + u * (x1 - x0);
        xs.push(x);
        ys.push(result.y_of_x(x));
    }
    (xs, ys)
}
