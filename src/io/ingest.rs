//! CSV ingest and normalization.
//!
//! This module turns a measurement CSV into the sparse nullable columns the
//! fitting kernel consumes.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Cell-level tolerance**: a blank or unparseable cell becomes a null
//!   column entry and a row note, never a kernel-visible garbage value
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::data::ColumnSet;
use crate::domain::{DatasetStats, Dimension, FitMode, FitType};
use crate::error::AppError;

/// Header aliases, lowercased. First match wins per role.
const X_ALIASES: &[&str] = &["x"];
const Y_ALIASES: &[&str] = &["y"];
const ERR_X_ALIASES: &[&str] = &["err_x", "errx", "dx", "sx", "x_err"];
const ERR_Y_ALIASES: &[&str] = &["err_y", "erry", "dy", "sy", "y_err"];

/// A cell-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowNote {
    /// 1-based CSV line (excluding the header).
    pub line: usize,
    pub column: String,
    pub message: String,
}

/// Ingest output: populated columns + stats + row notes.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub columns: ColumnSet,
    pub stats: DatasetStats,
    pub row_notes: Vec<RowNote>,
    pub rows_read: usize,
}

/// Load a measurement CSV into columns.
pub fn load_columns(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let x_col = find_column(&header_map, X_ALIASES)
        .ok_or_else(|| AppError::new(2, "CSV is missing a required 'x' column."))?;
    let y_col = find_column(&header_map, Y_ALIASES)
        .ok_or_else(|| AppError::new(2, "CSV is missing a required 'y' column."))?;
    let err_x_col = find_column(&header_map, ERR_X_ALIASES);
    let err_y_col = find_column(&header_map, ERR_Y_ALIASES);

    let mut columns = ColumnSet::new();
    let mut row_notes = Vec::new();
    let mut rows_read = 0usize;

    for (row_index, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| AppError::new(2, format!("Failed to read CSV record: {e}")))?;
        rows_read += 1;
        let line = row_index + 1;

        let read_cell = |col: Option<usize>, name: &str, notes: &mut Vec<RowNote>| -> Option<f64> {
            let raw = col.and_then(|c| record.get(c)).unwrap_or("");
            if raw.is_empty() {
                return None;
            }
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                Ok(v) => {
                    notes.push(RowNote {
                        line,
                        column: name.to_string(),
                        message: format!("non-finite value '{v}' treated as empty"),
                    });
                    None
                }
                Err(_) => {
                    notes.push(RowNote {
                        line,
                        column: name.to_string(),
                        message: format!("unparseable value '{raw}' treated as empty"),
                    });
                    None
                }
            }
        };

        let x = read_cell(Some(x_col), "x", &mut row_notes);
        let y = read_cell(Some(y_col), "y", &mut row_notes);
        let ex = read_cell(err_x_col, "err_x", &mut row_notes);
        let ey = read_cell(err_y_col, "err_y", &mut row_notes);

        columns.value_mut(Dimension::X).set(row_index, x);
        columns.value_mut(Dimension::Y).set(row_index, y);
        // Zero uncertainties are coerced to null by the column itself.
        columns.error_mut(Dimension::X).set(row_index, ex);
        columns.error_mut(Dimension::Y).set(row_index, ey);
    }

    let stats = compute_stats(&columns);

    Ok(IngestedData {
        columns,
        stats,
        row_notes,
        rows_read,
    })
}

/// Resolve `--fit auto` against which error columns actually carry data.
pub fn resolve_fit_type(mode: FitMode, columns: &ColumnSet) -> FitType {
    if let Some(fit_type) = mode.to_fit_type() {
        return fit_type;
    }
    let has_x = columns.has_error_data(Dimension::X);
    let has_y = columns.has_error_data(Dimension::Y);
    match (has_x, has_y) {
        (true, true) => FitType::BothErrors,
        (false, true) => FitType::YError,
        (true, false) => FitType::XError,
        (false, false) => FitType::Regular,
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|a| header_map.get(*a).copied())
}

fn compute_stats(columns: &ColumnSet) -> DatasetStats {
    let mut n = 0usize;
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for i in columns.value(Dimension::X).indices() {
        let Some(x) = columns.value(Dimension::X).get(i) else {
            continue;
        };
        let Some(y) = columns.value(Dimension::Y).get(i) else {
            continue;
        };
        n += 1;
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    DatasetStats {
        n_points: n,
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("linefit_ingest_{name}.csv"));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_simple_csv() {
        let path = write_temp_csv(
            "simple",
            "x,y,err_y\n1.0,2.1,0.2\n2.0,3.9,0.2\n3.0,6.2,0.2\n",
        );
        let data = load_columns(&path).unwrap();

        assert_eq!(data.rows_read, 3);
        assert_eq!(data.stats.n_points, 3);
        assert!(data.row_notes.is_empty());
        assert_eq!(data.columns.value(Dimension::X).get(1), Some(2.0));
        assert_eq!(data.columns.error(Dimension::Y).get(2), Some(0.2));
        assert!(!data.columns.has_error_data(Dimension::X));
    }

    #[test]
    fn blank_and_garbage_cells_become_nulls_with_notes() {
        let path = write_temp_csv(
            "garbage",
            "x,y,err_y\n1.0,2.1,0.2\n,3.9,abc\n3.0,,0.2\n",
        );
        let data = load_columns(&path).unwrap();

        assert_eq!(data.rows_read, 3);
        // Row 2 lost x (blank, no note) and err_y (garbage, note);
        // row 3 lost y (blank, no note).
        assert_eq!(data.stats.n_points, 1);
        assert_eq!(data.row_notes.len(), 1);
        assert_eq!(data.row_notes[0].line, 2);
        assert_eq!(data.row_notes[0].column, "err_y");
    }

    #[test]
    fn zero_uncertainty_cells_are_coerced_to_null() {
        let path = write_temp_csv("zero", "x,y,err_y\n1.0,2.1,0.0\n2.0,3.9,0.2\n");
        let data = load_columns(&path).unwrap();

        assert_eq!(data.columns.error(Dimension::Y).get(0), None);
        assert_eq!(data.columns.error(Dimension::Y).get(1), Some(0.2));
    }

    #[test]
    fn missing_required_column_is_a_config_error() {
        let path = write_temp_csv("nox", "a,y\n1.0,2.0\n");
        let err = load_columns(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn header_aliases_are_case_insensitive() {
        let path = write_temp_csv("alias", "X,Y,dX,dY\n1.0,2.0,0.1,0.2\n");
        let data = load_columns(&path).unwrap();

        assert_eq!(data.columns.error(Dimension::X).get(0), Some(0.1));
        assert_eq!(data.columns.error(Dimension::Y).get(0), Some(0.2));
    }

    #[test]
    fn auto_fit_mode_resolves_from_error_columns() {
        let path = write_temp_csv("auto", "x,y,err_y\n1.0,2.0,0.2\n");
        let data = load_columns(&path).unwrap();

        assert_eq!(resolve_fit_type(FitMode::Auto, &data.columns), FitType::YError);
        assert_eq!(
            resolve_fit_type(FitMode::Regular, &data.columns),
            FitType::Regular
        );
    }
}
