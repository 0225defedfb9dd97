//! Fit engine: strategy selection, refresh, and result access.
//!
//! The engine owns the current `FitSpec`, the active both-errors strategy,
//! and the last computed `FitResult`. Results are recomputed only on an
//! explicit [`FitEngine::refresh`]; every spec transition clears the stored
//! result so stale values can never be read after a reconfiguration.
//!
//! Strategies are plain functions over an immutable point snapshot. Their
//! capabilities (which parameters they can pin) live as data in the static
//! [`STRATEGIES`] registry, and the active strategy is an explicit
//! constructor argument rather than process-wide state.

use log::warn;

use crate::data::ColumnSet;
use crate::domain::{FitResult, FitSpec, FitType, FixedVariable, StrategyKind};
use crate::fit::{minimizer, points, quadratic, wls};

/// Capability descriptor for one both-errors strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyInfo {
    pub kind: StrategyKind,
    pub name: &'static str,
    pub can_fix_slope: bool,
    pub can_fix_intercept: bool,
}

/// The strategy registry.
///
/// The quadratic strategy cannot pin either parameter: its seed could honor
/// a pin, but the surface sampling assumes both parameters are free.
pub const STRATEGIES: &[StrategyInfo] = &[
    StrategyInfo {
        kind: StrategyKind::Minimizer,
        name: "iterative chi-squared minimizer",
        can_fix_slope: true,
        can_fix_intercept: true,
    },
    StrategyInfo {
        kind: StrategyKind::Quadratic,
        name: "quadratic error approximation",
        can_fix_slope: false,
        can_fix_intercept: false,
    },
];

/// Look up the registry entry for a strategy kind.
pub fn strategy_info(kind: StrategyKind) -> &'static StrategyInfo {
    STRATEGIES
        .iter()
        .find(|s| s.kind == kind)
        .unwrap_or(&STRATEGIES[0])
}

impl StrategyInfo {
    pub fn can_fix(&self, variable: FixedVariable) -> bool {
        match variable {
            FixedVariable::None => true,
            FixedVariable::Slope => self.can_fix_slope,
            FixedVariable::Intercept => self.can_fix_intercept,
        }
    }
}

/// Computes and caches fits over a dataset it does not own.
///
/// Single-threaded and synchronous: `refresh` runs to completion, and the
/// caller serializes access around it.
#[derive(Debug, Clone)]
pub struct FitEngine {
    spec: FitSpec,
    strategy: StrategyKind,
    result: Option<FitResult>,
    n_points: usize,
}

impl FitEngine {
    pub fn new(fit_type: FitType, strategy: StrategyKind) -> Self {
        Self {
            spec: FitSpec::free(fit_type),
            strategy,
            result: None,
            n_points: 0,
        }
    }

    pub fn spec(&self) -> &FitSpec {
        &self.spec
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Number of points the last refresh fit over.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn set_fit_type(&mut self, fit_type: FitType) {
        self.spec.fit_type = fit_type;
        self.result = None;
    }

    /// Pin (or unpin) a parameter.
    ///
    /// The request is recorded even when the active strategy cannot honor it;
    /// that case is non-fatal and only logged. This does not trigger a
    /// recomputation: the engine holds no columns, so callers own the
    /// follow-up [`FitEngine::refresh`]. The stored result is cleared here so
    /// a missed refresh reads `None` rather than a stale fit.
    pub fn set_fixed(&mut self, variable: FixedVariable, value: f64) {
        let info = strategy_info(self.strategy);
        if self.spec.fit_type == FitType::BothErrors && !info.can_fix(variable) {
            warn!(
                "strategy '{}' cannot fix {:?}; request recorded but has no numerical effect",
                info.name, variable
            );
        }
        self.spec.fixed = variable;
        self.spec.fixed_value = value;
        self.result = None;
    }

    /// Recompute the fit from the current columns.
    ///
    /// No-op (clears the result) when no point qualifies for the current fit
    /// type — that is "no fit displayable", not an error.
    pub fn refresh(&mut self, columns: &ColumnSet) {
        let snapshot = points::snapshot_points(columns, self.spec.fit_type);
        self.n_points = snapshot.len();
        if snapshot.is_empty() {
            self.result = None;
            return;
        }

        self.result = Some(match self.spec.fit_type {
            FitType::BothErrors => match self.strategy {
                StrategyKind::Minimizer => minimizer::fit(&snapshot, &self.spec),
                StrategyKind::Quadratic => quadratic::fit(&snapshot),
            },
            fit_type => {
                let est = wls::fit(&snapshot, fit_type, &self.spec);
                FitResult {
                    slope: est.slope,
                    intercept: est.intercept,
                    slope_error: est.slope_error,
                    intercept_error: est.intercept_error,
                    chi_squared: wls::chi_squared(est.slope, est.intercept, &snapshot, fit_type),
                }
            }
        });
    }

    pub fn result(&self) -> Option<&FitResult> {
        self.result.as_ref()
    }

    pub fn slope(&self) -> Option<f64> {
        self.result.map(|r| r.slope)
    }

    pub fn intercept(&self) -> Option<f64> {
        self.result.map(|r| r.intercept)
    }

    pub fn slope_error(&self) -> Option<f64> {
        self.result.map(|r| r.slope_error)
    }

    pub fn intercept_error(&self) -> Option<f64> {
        self.result.map(|r| r.intercept_error)
    }

    pub fn chi_squared(&self) -> Option<f64> {
        self.result.map(|r| r.chi_squared)
    }

    /// Evaluate the fitted line at `x`.
    pub fn y_of_x(&self, x: f64) -> Option<f64> {
        self.result.map(|r| r.y_of_x(x))
    }

    /// Invert the fitted line at `y`.
    pub fn x_of_y(&self, y: f64) -> Option<f64> {
        self.result.map(|r| r.x_of_y(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimension;

    fn columns(rows: &[(f64, f64, Option<f64>, Option<f64>)]) -> ColumnSet {
        let mut cols = ColumnSet::new();
        for (i, &(x, y, ex, ey)) in rows.iter().enumerate() {
            cols.value_mut(Dimension::X).set(i, Some(x));
            cols.value_mut(Dimension::Y).set(i, Some(y));
            cols.error_mut(Dimension::X).set(i, ex);
            cols.error_mut(Dimension::Y).set(i, ey);
        }
        cols
    }

    #[test]
    fn refresh_with_no_valid_points_clears_the_result() {
        let mut engine = FitEngine::new(FitType::YError, StrategyKind::Minimizer);
        // No error data at all, so the y-error fit has nothing to use.
        let cols = columns(&[(1.0, 2.0, None, None), (2.0, 3.0, None, None)]);

        engine.refresh(&cols);
        assert!(engine.result().is_none());
        assert_eq!(engine.slope(), None);
        assert_eq!(engine.n_points(), 0);
    }

    #[test]
    fn regular_fit_round_trips_through_the_engine() {
        let mut engine = FitEngine::new(FitType::Regular, StrategyKind::Minimizer);
        let cols = columns(&[(0.0, 1.0, None, None), (2.0, 5.0, None, None)]);

        engine.refresh(&cols);
        let r = engine.result().expect("fit computed");
        assert!((r.slope - 2.0).abs() < 1e-12);
        assert!((r.intercept - 1.0).abs() < 1e-12);
        assert!(r.chi_squared.abs() < 1e-12);
        assert_eq!(engine.n_points(), 2);
    }

    #[test]
    fn line_inversion_is_consistent() {
        let mut engine = FitEngine::new(FitType::Regular, StrategyKind::Minimizer);
        let cols = columns(&[
            (0.0, 0.9, None, None),
            (1.0, 3.1, None, None),
            (2.0, 5.0, None, None),
        ]);
        engine.refresh(&cols);

        for &x in &[-10.0, -1.5, 0.0, 0.25, 7.0] {
            let y = engine.y_of_x(x).unwrap();
            let back = engine.x_of_y(y).unwrap();
            assert!((back - x).abs() < 1e-9, "x={x} round-tripped to {back}");
        }
    }

    #[test]
    fn spec_transitions_clear_stale_results() {
        let mut engine = FitEngine::new(FitType::Regular, StrategyKind::Minimizer);
        let cols = columns(&[(0.0, 1.0, None, None), (2.0, 5.0, None, None)]);
        engine.refresh(&cols);
        assert!(engine.result().is_some());

        engine.set_fit_type(FitType::BothErrors);
        assert!(engine.result().is_none());

        // No error columns: both-errors has zero valid points.
        engine.refresh(&cols);
        assert!(engine.result().is_none());
    }

    #[test]
    fn fixing_slope_applies_across_fit_types() {
        let rows = [
            (1.0, 2.1, Some(0.1), Some(0.2)),
            (2.0, 3.9, Some(0.1), Some(0.2)),
            (3.0, 6.2, Some(0.1), Some(0.2)),
        ];
        let cols = columns(&rows);

        for fit_type in [
            FitType::Regular,
            FitType::XError,
            FitType::YError,
            FitType::BothErrors,
        ] {
            let mut engine = FitEngine::new(fit_type, StrategyKind::Minimizer);
            engine.set_fixed(FixedVariable::Slope, 2.0);
            engine.refresh(&cols);
            let r = engine.result().expect("fit computed");
            assert_eq!(r.slope, 2.0, "{fit_type:?}");
            assert_eq!(r.slope_error, 0.0, "{fit_type:?}");
        }
    }

    #[test]
    fn quadratic_strategy_ignores_fix_requests() {
        let rows = [
            (1.0, 2.1, Some(0.1), Some(0.2)),
            (2.0, 3.9, Some(0.1), Some(0.2)),
            (3.0, 6.2, Some(0.1), Some(0.2)),
        ];
        let cols = columns(&rows);

        let mut engine = FitEngine::new(FitType::BothErrors, StrategyKind::Quadratic);
        engine.set_fixed(FixedVariable::Slope, 5.0);
        // The request is recorded...
        assert_eq!(engine.spec().fixed, FixedVariable::Slope);

        engine.refresh(&cols);
        let r = engine.result().expect("fit computed");
        // ...but has no numerical effect.
        assert!((r.slope - 5.0).abs() > 0.5);
    }

    #[test]
    fn registry_exposes_capability_flags() {
        assert!(strategy_info(StrategyKind::Minimizer).can_fix_slope);
        assert!(strategy_info(StrategyKind::Minimizer).can_fix_intercept);
        assert!(!strategy_info(StrategyKind::Quadratic).can_fix_slope);
        assert!(!strategy_info(StrategyKind::Quadratic).can_fix_intercept);
    }
}
