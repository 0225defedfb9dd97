//! The fit pipeline: ingest → engine refresh → point snapshot.
//!
//! Kept separate from `app` so the full run (minus terminal output) is
//! drivable from tests.

use crate::domain::{FitConfig, FitPoint, FitResult, FitSpec, StrategyKind};
use crate::error::AppError;
use crate::fit::{snapshot_points, FitEngine};
use crate::io::ingest::{load_columns, resolve_fit_type, IngestedData};

/// Everything a fit run produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub spec: FitSpec,
    pub strategy: StrategyKind,
    pub result: Option<FitResult>,
    /// The exact points the fit was computed over.
    pub points: Vec<FitPoint>,
}

/// Run a full fit from a `FitConfig`.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_columns(&config.csv_path)?;
    let fit_type = resolve_fit_type(config.fit_mode, &ingest.columns);

    let mut engine = FitEngine::new(fit_type, config.strategy);
    engine.set_fixed(config.fixed, config.fixed_value);
    engine.refresh(&ingest.columns);

    let points = snapshot_points(&ingest.columns, fit_type);
    let result = engine.result().copied();
    let spec = *engine.spec();

    Ok(RunOutput {
        ingest,
        spec,
        strategy: config.strategy,
        result,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitMode, FitType, FixedVariable};
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("linefit_pipeline_{name}.csv"));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn base_config(csv_path: PathBuf) -> FitConfig {
        FitConfig {
            csv_path,
            fit_mode: FitMode::Auto,
            strategy: StrategyKind::Minimizer,
            fixed: FixedVariable::None,
            fixed_value: 0.0,
            plot: false,
            plot_width: 72,
            plot_height: 20,
            export_results: None,
            export_line: None,
        }
    }

    #[test]
    fn end_to_end_both_errors_fit() {
        let path = write_temp_csv(
            "both",
            "x,y,err_x,err_y\n1.0,2.1,0.1,0.2\n2.0,3.9,0.1,0.2\n3.0,6.2,0.1,0.2\n",
        );
        let run = run_fit(&base_config(path)).unwrap();

        assert_eq!(run.spec.fit_type, FitType::BothErrors);
        let result = run.result.expect("fit computed");
        assert!(result.slope > 1.8 && result.slope < 2.2);
        assert!(result.intercept > -0.5 && result.intercept < 0.5);
        assert_eq!(run.points.len(), 3);
    }

    #[test]
    fn auto_mode_falls_back_to_regular_without_error_columns() {
        let path = write_temp_csv("plain", "x,y\n0.0,1.0\n2.0,5.0\n");
        let run = run_fit(&base_config(path)).unwrap();

        assert_eq!(run.spec.fit_type, FitType::Regular);
        let result = run.result.expect("fit computed");
        assert!((result.slope - 2.0).abs() < 1e-10);
        assert!((result.intercept - 1.0).abs() < 1e-10);
    }

    #[test]
    fn incomplete_rows_produce_no_fit_rather_than_an_error() {
        let path = write_temp_csv("incomplete", "x,y\n1.0,\n,2.0\n");
        let run = run_fit(&base_config(path)).unwrap();

        assert!(run.result.is_none());
        assert!(run.points.is_empty());
    }

    #[test]
    fn fixed_slope_flows_through_the_pipeline() {
        let path = write_temp_csv("fixed", "x,y,err_y\n1.0,2.1,0.2\n2.0,3.9,0.2\n3.0,6.2,0.2\n");
        let mut config = base_config(path);
        config.fixed = FixedVariable::Slope;
        config.fixed_value = 2.0;

        let run = run_fit(&config).unwrap();
        let result = run.result.expect("fit computed");
        assert_eq!(result.slope, 2.0);
        assert_eq!(result.slope_error, 0.0);
    }
}
