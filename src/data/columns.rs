//! Sparse nullable measurement columns.
//!
//! A `Column` maps row index → value; an index never written is implicitly
//! null. This mirrors how data entry works upstream: cells can be filled in
//! any order, cleared, and left blank without shifting their neighbors.
//!
//! Error columns carry one extra rule: a stored uncertainty of exactly `0.0`
//! is meaningless (it would produce an infinite weight), so writing zero is
//! coerced to null and treated as "no uncertainty supplied" for that point.

use std::collections::BTreeMap;

use crate::domain::Dimension;

/// Whether a column stores measured values or their uncertainties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Value,
    Error,
}

/// An ordered, sparse sequence of nullable doubles.
#[derive(Debug, Clone)]
pub struct Column {
    role: ColumnRole,
    cells: BTreeMap<usize, f64>,
}

impl Column {
    pub fn values() -> Self {
        Self {
            role: ColumnRole::Value,
            cells: BTreeMap::new(),
        }
    }

    pub fn errors() -> Self {
        Self {
            role: ColumnRole::Error,
            cells: BTreeMap::new(),
        }
    }

    pub fn role(&self) -> ColumnRole {
        self.role
    }

    /// Write a cell. `None` clears it; on an error column, `Some(0.0)`
    /// clears it too.
    pub fn set(&mut self, index: usize, value: Option<f64>) {
        match value {
            Some(v) if self.role() == ColumnRole::Error && v == 0.0 => {
                self.cells.remove(&index);
            }
            Some(v) => {
                self.cells.insert(index, v);
            }
            None => {
                self.cells.remove(&index);
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.cells.get(&index).copied()
    }

    /// `1 + highest written index`, or 0 when nothing was ever written.
    pub fn len(&self) -> usize {
        self.cells.keys().next_back().map_or(0, |&i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ascending indices of non-null cells.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.keys().copied()
    }
}

/// The four columns of a measurement dataset.
///
/// Owns the data that fits are computed from; fit strategies never hold a
/// reference back into this (they receive an immutable point snapshot).
#[derive(Debug, Clone)]
pub struct ColumnSet {
    x: Column,
    y: Column,
    err_x: Column,
    err_y: Column,
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnSet {
    pub fn new() -> Self {
        Self {
            x: Column::values(),
            y: Column::values(),
            err_x: Column::errors(),
            err_y: Column::errors(),
        }
    }

    pub fn value(&self, dim: Dimension) -> &Column {
        match dim {
            Dimension::X => &self.x,
            Dimension::Y => &self.y,
        }
    }

    pub fn value_mut(&mut self, dim: Dimension) -> &mut Column {
        match dim {
            Dimension::X => &mut self.x,
            Dimension::Y => &mut self.y,
        }
    }

    pub fn error(&self, dim: Dimension) -> &Column {
        match dim {
            Dimension::X => &self.err_x,
            Dimension::Y => &self.err_y,
        }
    }

    pub fn error_mut(&mut self, dim: Dimension) -> &mut Column {
        match dim {
            Dimension::X => &mut self.err_x,
            Dimension::Y => &mut self.err_y,
        }
    }

    /// True when the error column for `dim` has at least one value.
    pub fn has_error_data(&self, dim: Dimension) -> bool {
        !self.error(dim).is_empty()
    }

    /// Number of rows spanned by any column.
    pub fn row_count(&self) -> usize {
        self.x
            .len()
            .max(self.y.len())
            .max(self.err_x.len())
            .max(self.err_y.len())
    }
}
