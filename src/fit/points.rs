//! Valid point extraction.
//!
//! A fit is only computable on rows where every column the fit type needs is
//! non-null. X and Y are always required; error columns are required per fit
//! type. The result is an ascending index set, re-derived from scratch on
//! every refresh so strategies never see partially aligned arrays.

use std::collections::BTreeSet;

use crate::data::ColumnSet;
use crate::domain::{Dimension, FitPoint, FitType, DIMENSIONS};

/// Indices where every measured dimension is present.
pub fn valid_indices(columns: &ColumnSet) -> BTreeSet<usize> {
    columns
        .value(Dimension::X)
        .indices()
        .filter(|&i| DIMENSIONS.iter().all(|&d| columns.value(d).get(i).is_some()))
        .collect()
}

/// Drop indices missing an error value required by `fit_type`.
///
/// Removing a disqualified point can never re-qualify another, but we still
/// re-derive until the set stops changing: the contract is that the returned
/// set is stable under its own filter, whatever the required dimensions are.
pub fn filter_by_required_errors(
    indices: &BTreeSet<usize>,
    fit_type: FitType,
    columns: &ColumnSet,
) -> BTreeSet<usize> {
    let required = fit_type.required_error_dims();
    let mut current = indices.clone();
    loop {
        let filtered: BTreeSet<usize> = current
            .iter()
            .copied()
            .filter(|&i| required.iter().all(|&d| columns.error(d).get(i).is_some()))
            .collect();
        if filtered == current {
            return filtered;
        }
        current = filtered;
    }
}

/// Build the immutable point snapshot for a fit.
///
/// Returns an empty vector when no row qualifies; callers treat that as
/// "no fit displayable", not an error.
pub fn snapshot_points(columns: &ColumnSet, fit_type: FitType) -> Vec<FitPoint> {
    let valid = valid_indices(columns);
    let usable = filter_by_required_errors(&valid, fit_type, columns);

    usable
        .into_iter()
        .map(|i| FitPoint {
            index: i,
            // Both present by construction of `valid_indices`.
            x: columns.value(Dimension::X).get(i).unwrap_or(f64::NAN),
            y: columns.value(Dimension::Y).get(i).unwrap_or(f64::NAN),
            err_x: columns.error(Dimension::X).get(i),
            err_y: columns.error(Dimension::Y).get(i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnSet;

    fn columns_with(rows: &[(usize, Option<f64>, Option<f64>, Option<f64>, Option<f64>)]) -> ColumnSet {
        let mut cols = ColumnSet::new();
        for &(i, x, y, ex, ey) in rows {
            cols.value_mut(Dimension::X).set(i, x);
            cols.value_mut(Dimension::Y).set(i, y);
            cols.error_mut(Dimension::X).set(i, ex);
            cols.error_mut(Dimension::Y).set(i, ey);
        }
        cols
    }

    #[test]
    fn valid_indices_requires_both_coordinates() {
        let cols = columns_with(&[
            (0, Some(1.0), Some(2.0), None, None),
            (1, Some(1.0), None, None, None),
            (2, None, Some(2.0), None, None),
            (5, Some(3.0), Some(4.0), None, None),
        ]);

        let valid = valid_indices(&cols);
        assert_eq!(valid.into_iter().collect::<Vec<_>>(), vec![0, 5]);
    }

    #[test]
    fn error_filter_drops_rows_missing_required_errors() {
        let cols = columns_with(&[
            (0, Some(1.0), Some(2.0), Some(0.1), Some(0.2)),
            (1, Some(2.0), Some(3.0), None, Some(0.2)),
            (2, Some(3.0), Some(4.0), Some(0.1), None),
        ]);

        let valid = valid_indices(&cols);

        let y_only = filter_by_required_errors(&valid, FitType::YError, &cols);
        assert_eq!(y_only.into_iter().collect::<Vec<_>>(), vec![0, 1]);

        let both = filter_by_required_errors(&valid, FitType::BothErrors, &cols);
        assert_eq!(both.into_iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn regular_fit_ignores_error_columns() {
        let cols = columns_with(&[
            (0, Some(1.0), Some(2.0), None, None),
            (1, Some(2.0), Some(3.0), None, None),
        ]);

        let points = snapshot_points(&cols, FitType::Regular);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].err_x, None);
    }

    #[test]
    fn zero_uncertainty_never_reaches_the_snapshot() {
        // A zero written into an error column is coerced to null on write, so
        // the row is excluded from error-aware fits rather than carrying an
        // infinite weight.
        let mut cols = columns_with(&[(0, Some(1.0), Some(2.0), None, None)]);
        cols.error_mut(Dimension::Y).set(0, Some(0.0));

        let points = snapshot_points(&cols, FitType::YError);
        assert!(points.is_empty());
    }

    #[test]
    fn empty_dataset_yields_empty_snapshot() {
        let cols = ColumnSet::new();
        assert!(snapshot_points(&cols, FitType::Regular).is_empty());
    }
}
