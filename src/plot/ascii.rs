//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted line: `-`

use crate::domain::{FitPoint, FitResult, LineFile};

/// Render a plot for an in-memory fit result.
pub fn render_ascii_plot(
    points: &[FitPoint],
    result: &FitResult,
    width: usize,
    height: usize,
) -> String {
    let (x_min, x_max) = x_range_from_points(points).unwrap_or((0.0, 1.0));
    let line = sample_line(result, x_min, x_max, width.max(2));
    render_plot(points, &line, x_min, x_max, width, height)
}

/// Render a plot from a saved line JSON file (line only, no overlay points).
pub fn render_ascii_plot_from_line_file(line: &LineFile, width: usize, height: usize) -> String {
    let (x_min, x_max) = grid_x_range(line).unwrap_or((0.0, 1.0));
    let segments: Vec<(f64, f64)> = line
        .grid
        .x
        .iter()
        .zip(line.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    render_plot(&[], &segments, x_min, x_max, width, height)
}

fn render_plot(
    points: &[FitPoint],
    line: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(points, line).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for &(x, y) in line {
        if let Some((col, row)) = to_cell(x, y, x_min, x_max, y_min, y_max, width, height) {
            grid[row][col] = '-';
        }
    }

    for p in points {
        if let Some((col, row)) = to_cell(p.x, p.y, x_min, x_max, y_min, y_max, width, height) {
            grid[row][col] = 'o';
        }
    }

    let mut out = String::new();
    out.push_str(&format!("y: [{y_min:.4}, {y_max:.4}]\n"));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!("x: [{x_min:.4}, {x_max:.4}]\n"));
    out
}

fn to_cell(
    x: f64,
    y: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    if !(x.is_finite() && y.is_finite()) || x_max <= x_min || y_max <= y_min {
        return None;
    }
    let u = (x - x_min) / (x_max - x_min);
    let v = (y - y_min) / (y_max - y_min);
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }
    let col = ((u * (width as f64 - 1.0)).round() as usize).min(width - 1);
    // Row 0 is the top of the plot.
    let row = height - 1 - ((v * (height as f64 - 1.0)).round() as usize).min(height - 1);
    Some((col, row))
}

fn sample_line(result: &FitResult, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, result.y_of_x(x))
        })
        .collect()
}

fn x_range_from_points(points: &[FitPoint]) -> Option<(f64, f64)> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).filter(|v| v.is_finite()).collect();
    range_of(&xs)
}

fn grid_x_range(line: &LineFile) -> Option<(f64, f64)> {
    range_of(&line.grid.x)
}

fn y_range(points: &[FitPoint], line: &[(f64, f64)]) -> Option<(f64, f64)> {
    let ys: Vec<f64> = points
        .iter()
        .map(|p| p.y)
        .chain(line.iter().map(|&(_, y)| y))
        .filter(|v| v.is_finite())
        .collect();
    range_of(&ys)
}

fn range_of(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).max(1e-12);
    (min - span * frac, max + span * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<FitPoint> {
        [(1.0, 2.1), (2.0, 3.9), (3.0, 6.2)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| FitPoint {
                index: i,
                x,
                y,
                err_x: None,
                err_y: None,
            })
            .collect()
    }

    fn result() -> FitResult {
        FitResult {
            slope: 2.05,
            intercept: -0.03,
            slope_error: 0.1,
            intercept_error: 0.2,
            chi_squared: 0.5,
        }
    }

    #[test]
    fn plot_is_deterministic() {
        let a = render_ascii_plot(&points(), &result(), 40, 12);
        let b = render_ascii_plot(&points(), &result(), 40, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn plot_contains_points_and_line() {
        let plot = render_ascii_plot(&points(), &result(), 40, 12);
        assert!(plot.contains('o'));
        assert!(plot.contains('-'));
        assert_eq!(plot.lines().count(), 14);
    }

    #[test]
    fn non_finite_result_still_renders_points() {
        let bad = FitResult {
            slope: f64::NAN,
            intercept: f64::NAN,
            slope_error: f64::NAN,
            intercept_error: f64::NAN,
            chi_squared: f64::NAN,
        };
        let plot = render_ascii_plot(&points(), &bad, 40, 12);
        assert!(plot.contains('o'));
    }
}
