//! Dense row-major grids
//!
//! [`Grid`] is the storage used for every matrix in an analysis: the
//! measured [`SourceMatrix`], the [`ExpandedField`] produced by grid
//! expansion, and the per-zone [`BooleanMask`]s.

use crate::constants::{is_measured, SENTINEL};
use crate::error::SourceError;
use serde::{Deserialize, Serialize};

/// A dense `rows x cols` matrix stored row-major (`row * cols + col`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Per-cell membership flags for one zone.
pub type BooleanMask = Grid<bool>;

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, SourceError> {
        let row_count = rows.len();
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 || cols == 0 {
            return Err(SourceError::Empty);
        }

        let mut data = Vec::with_capacity(row_count * cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(SourceError::Ragged {
                    row: index,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    /// Copy the grid back out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Return a copy with the row order reversed.
    ///
    /// Presentation layers that draw row 0 at the bottom use this; the
    /// engine never flips on its own.
    pub fn flipped_rows(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in (0..self.rows).rev() {
            data.extend_from_slice(self.row(row));
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> Grid<T> {
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a cell, or `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    /// Overwrite a cell. Does nothing outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        self.data[row * self.cols + col] = value;
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// All cells in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate `(row, col, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let cols = self.cols.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(index, value)| (index / cols, index % cols, value))
    }
}

impl Grid<bool> {
    /// Number of set cells
    pub fn count(&self) -> usize {
        self.data.iter().filter(|flag| **flag).count()
    }

    /// True if any cell is set
    pub fn any(&self) -> bool {
        self.data.iter().any(|flag| *flag)
    }

    /// Cell-wise OR of two masks of the same shape
    pub fn union(&self, other: &Self) -> Self {
        debug_assert_eq!(self.dims(), other.dims());
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| *a || *b)
                .collect(),
        }
    }
}

/// Measured thickness readings, `rows x cols`, no sentinel cells expected.
///
/// Construction rejects empty or ragged input and any reading that is not
/// finite or is below zero. The unmeasured marker only appears after
/// expansion, so a `-1` here is a data error. Once built the matrix is
/// immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct SourceMatrix(Grid<f64>);

impl SourceMatrix {
    /// Build from nested rows of readings
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SourceError> {
        Self::from_grid(Grid::from_rows(rows)?)
    }

    /// Wrap an existing grid after validating it
    pub fn from_grid(grid: Grid<f64>) -> Result<Self, SourceError> {
        if grid.is_empty() {
            return Err(SourceError::Empty);
        }
        check_finite(&grid)?;
        check_non_negative(&grid)?;
        Ok(Self(grid))
    }

    /// Underlying grid
    pub fn grid(&self) -> &Grid<f64> {
        &self.0
    }

    pub fn rows(&self) -> usize {
        self.0.rows()
    }

    pub fn cols(&self) -> usize {
        self.0.cols()
    }
}

impl TryFrom<Vec<Vec<f64>>> for SourceMatrix {
    type Error = SourceError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<SourceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: SourceMatrix) -> Self {
        matrix.0.to_rows()
    }
}

fn check_finite(grid: &Grid<f64>) -> Result<(), SourceError> {
    match grid.cells().find(|(_, _, v)| !v.is_finite()) {
        Some((row, col, _)) => Err(SourceError::NonFinite { row, col }),
        None => Ok(()),
    }
}

fn check_non_negative(grid: &Grid<f64>) -> Result<(), SourceError> {
    match grid.cells().find(|(_, _, v)| **v < 0.0) {
        Some((row, col, value)) => Err(SourceError::NegativeReading {
            row,
            col,
            value: *value,
        }),
        None => Ok(()),
    }
}

/// The dense thickness field covering the whole cylinder surface.
///
/// Unmeasured cells hold [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedField(Grid<f64>);

impl ExpandedField {
    /// Wrap a grid that may contain sentinel cells
    pub fn from_grid(grid: Grid<f64>) -> Self {
        Self(grid)
    }

    /// Build from nested rows; `-1` marks unmeasured cells
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SourceError> {
        let grid = Grid::from_rows(rows)?;
        check_finite(&grid)?;
        Ok(Self(grid))
    }

    /// Underlying grid
    pub fn grid(&self) -> &Grid<f64> {
        &self.0
    }

    pub fn rows(&self) -> usize {
        self.0.rows()
    }

    pub fn cols(&self) -> usize {
        self.0.cols()
    }

    /// Value at a cell
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.0.get(row, col).copied()
    }

    /// True when the cell holds a measured value
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.value(row, col).is_some_and(is_measured)
    }

    /// Mask of measured cells
    pub fn valid_mask(&self) -> BooleanMask {
        self.0.map(|v| is_measured(*v))
    }

    /// Measured values in row-major order
    pub fn valid_values(&self) -> Vec<f64> {
        self.0
            .as_slice()
            .iter()
            .copied()
            .filter(|v| is_measured(*v))
            .collect()
    }

    /// Number of measured cells
    pub fn valid_count(&self) -> usize {
        self.0.as_slice().iter().filter(|v| is_measured(**v)).count()
    }

    /// Smallest and largest measured value, if any
    pub fn valid_range(&self) -> Option<(f64, f64)> {
        self.0
            .as_slice()
            .iter()
            .copied()
            .filter(|v| is_measured(*v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of sentinel cells
    pub fn sentinel_count(&self) -> usize {
        self.0.len() - self.valid_count()
    }

    /// Unwrap into the grid
    pub fn into_grid(self) -> Grid<f64> {
        self.0
    }
}

impl Default for ExpandedField {
    fn default() -> Self {
        Self(Grid::filled(0, 0, SENTINEL))
    }
}
