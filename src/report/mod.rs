//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! The kernel exposes raw numeric results only; everything string-shaped
//! happens here, including the "undefined" rendering of NaN/∞ fields.

use crate::domain::{DatasetStats, FitResult, FitSpec, FixedVariable, FitPoint, StrategyKind};
use crate::fit::strategy_info;
use crate::io::ingest::IngestedData;
use crate::io::pull;

/// Render a numeric field, treating non-finite values as "fit undefined".
fn fmt_value(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.6}")
    } else {
        "undefined".to_string()
    }
}

/// Format the full run summary (dataset stats + fit spec + parameters).
pub fn format_run_summary(
    ingest: &IngestedData,
    spec: &FitSpec,
    strategy: StrategyKind,
    result: Option<&FitResult>,
    n_fit_points: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== linefit - straight-line fit ===\n");
    out.push_str(&format!("Fit type: {}\n", spec.fit_type.display_name()));
    if spec.fit_type == crate::domain::FitType::BothErrors {
        out.push_str(&format!("Strategy: {}\n", strategy_info(strategy).name));
    }
    match spec.fixed {
        FixedVariable::None => {}
        FixedVariable::Slope => {
            out.push_str(&format!("Fixed: slope = {}\n", spec.fixed_value));
        }
        FixedVariable::Intercept => {
            out.push_str(&format!("Fixed: intercept = {}\n", spec.fixed_value));
        }
    }

    out.push_str(&format_dataset_stats(&ingest.stats, ingest.rows_read, n_fit_points));

    for note in &ingest.row_notes {
        out.push_str(&format!(
            "note: line {}, column {}: {}\n",
            note.line, note.column, note.message
        ));
    }

    match result {
        None => {
            out.push_str("\nNo fit: no valid points for this fit type.\n");
        }
        Some(r) => {
            out.push('\n');
            out.push_str(&format!(
                "slope     = {} ± {}\n",
                fmt_value(r.slope),
                fmt_value(r.slope_error)
            ));
            out.push_str(&format!(
                "intercept = {} ± {}\n",
                fmt_value(r.intercept),
                fmt_value(r.intercept_error)
            ));
            out.push_str(&format!("chi²      = {}\n", fmt_value(r.chi_squared)));

            let dof = n_fit_points.saturating_sub(spec.free_param_count());
            if dof > 0 && r.chi_squared.is_finite() {
                out.push_str(&format!(
                    "chi²/dof  = {} ({} dof)\n",
                    fmt_value(r.chi_squared / dof as f64),
                    dof
                ));
            }
        }
    }

    out
}

/// Format the per-point residual table.
pub fn format_residual_table(points: &[FitPoint], result: &FitResult) -> String {
    let mut out = String::new();
    out.push_str("\nidx        x           y       y_fit    residual      pull\n");

    for p in points {
        let y_fit = result.y_of_x(p.x);
        let residual = p.y - y_fit;
        let pull_str = pull(p, result)
            .map(|v| format!("{v:9.3}"))
            .unwrap_or_else(|| "        -".to_string());
        out.push_str(&format!(
            "{:>3} {:>10.4} {:>11.4} {:>11.4} {:>11.4} {}\n",
            p.index, p.x, p.y, y_fit, residual, pull_str
        ));
    }

    out
}

fn format_dataset_stats(stats: &DatasetStats, rows_read: usize, n_fit_points: usize) -> String {
    if stats.n_points == 0 {
        return format!("Rows read: {rows_read}; no complete (x, y) pairs.\n");
    }
    format!(
        "Rows read: {rows_read}; complete pairs: {}; used by fit: {n_fit_points}\n\
         x range: [{:.4}, {:.4}]; y range: [{:.4}, {:.4}]\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
    )
}
