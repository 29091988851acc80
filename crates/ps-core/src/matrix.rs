//! Fixed-shape dense matrix.
//!
//! Elements are addressed by `(column, row)` and stored column-major, so a
//! state vector is a single column and `column(0)` borrows it as a slice.
//! The shape never changes after construction; every binary operation checks
//! shapes and reports a [`CoreError`] instead of producing undefined values.

use core::fmt;

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Determinants at or below this magnitude are treated as singular.
pub const SINGULAR_DETERMINANT: Real = 1e-12;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    columns: usize,
    rows: usize,
    values: Vec<Real>,
}

impl Matrix {
    /// Zero-filled matrix with the given number of columns and rows.
    pub fn zeros(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            values: vec![0.0; columns * rows],
        }
    }

    /// Build from explicit column values. Every column must have the same,
    /// non-zero length.
    pub fn from_columns(columns: Vec<Vec<Real>>) -> CoreResult<Self> {
        let Some(first) = columns.first() else {
            return Err(CoreError::InvalidArg {
                what: "matrix needs at least one column",
            });
        };
        let rows = first.len();
        if rows == 0 {
            return Err(CoreError::InvalidArg {
                what: "matrix needs at least one row",
            });
        }
        if columns.iter().any(|c| c.len() != rows) {
            return Err(CoreError::InvalidArg {
                what: "matrix columns must all have the same length",
            });
        }

        let n_columns = columns.len();
        Ok(Self {
            columns: n_columns,
            rows,
            values: columns.into_iter().flatten().collect(),
        })
    }

    /// Build from row-major values, which reads more naturally for literals.
    pub fn from_rows(rows: Vec<Vec<Real>>) -> CoreResult<Self> {
        let Some(first) = rows.first() else {
            return Err(CoreError::InvalidArg {
                what: "matrix needs at least one row",
            });
        };
        let n_columns = first.len();
        if rows.iter().any(|r| r.len() != n_columns) {
            return Err(CoreError::InvalidArg {
                what: "matrix rows must all have the same length",
            });
        }
        let columns = (0..n_columns)
            .map(|c| rows.iter().map(|r| r[c]).collect())
            .collect();
        Self::from_columns(columns)
    }

    /// Single-column matrix, the shape used for state vectors.
    pub fn column_vector(values: &[Real]) -> Self {
        Self {
            columns: 1,
            rows: values.len(),
            values: values.to_vec(),
        }
    }

    /// Single-row matrix, the shape used for feedback gains.
    pub fn row_vector(values: &[Real]) -> Self {
        Self {
            columns: values.len(),
            rows: 1,
            values: values.to_vec(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `(columns, rows)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    fn offset(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.columns && row < self.rows,
            "matrix index ({column}, {row}) out of bounds for {}x{}",
            self.columns,
            self.rows
        );
        column * self.rows + row
    }

    /// Element at `(column, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the matrix, like slice indexing.
    pub fn get(&self, column: usize, row: usize) -> Real {
        self.values[self.offset(column, row)]
    }

    /// Checked element access.
    pub fn try_get(&self, column: usize, row: usize) -> CoreResult<Real> {
        if column >= self.columns {
            return Err(CoreError::IndexOob {
                what: "matrix column",
                index: column,
                len: self.columns,
            });
        }
        if row >= self.rows {
            return Err(CoreError::IndexOob {
                what: "matrix row",
                index: row,
                len: self.rows,
            });
        }
        Ok(self.get(column, row))
    }

    /// Overwrite the element at `(column, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the matrix.
    pub fn set(&mut self, column: usize, row: usize, value: Real) {
        let i = self.offset(column, row);
        self.values[i] = value;
    }

    /// Borrow one column.
    pub fn column(&self, column: usize) -> &[Real] {
        let start = self.offset(column, 0);
        &self.values[start..start + self.rows]
    }

    /// Copy out one row.
    pub fn row(&self, row: usize) -> Vec<Real> {
        (0..self.columns).map(|c| self.get(c, row)).collect()
    }

    /// All elements in column-major order.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Element-wise sum. Both operands must have the same shape.
    pub fn add(&self, other: &Matrix) -> CoreResult<Matrix> {
        if self.shape() != other.shape() {
            return Err(self.mismatch("add", other));
        }
        Ok(Self {
            columns: self.columns,
            rows: self.rows,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// `self - other`, defined as `self + (-1 * other)`.
    pub fn subtract(&self, other: &Matrix) -> CoreResult<Matrix> {
        self.add(&other.scale(-1.0))
    }

    /// Matrix product `self * other`. The columns of `self` must equal the
    /// rows of `other`; the result has `other.columns()` columns and
    /// `self.rows()` rows.
    pub fn multiply(&self, other: &Matrix) -> CoreResult<Matrix> {
        if self.columns != other.rows {
            return Err(self.mismatch("multiply", other));
        }

        let mut out = Matrix::zeros(other.columns, self.rows);
        for row in 0..self.rows {
            for column in 0..other.columns {
                let dot: Real = (0..self.columns)
                    .map(|k| self.get(k, row) * other.get(column, k))
                    .sum();
                out.set(column, row, dot);
            }
        }
        Ok(out)
    }

    /// Multiply every element by a scalar.
    pub fn scale(&self, factor: Real) -> Matrix {
        Self {
            columns: self.columns,
            rows: self.rows,
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Read a 1x1 matrix (e.g. a row vector times a column vector) as a scalar.
    pub fn as_scalar(&self) -> CoreResult<Real> {
        if self.shape() != (1, 1) {
            return Err(CoreError::ShapeMismatch {
                op: "as_scalar",
                left_columns: self.columns,
                left_rows: self.rows,
                right_columns: 1,
                right_rows: 1,
            });
        }
        Ok(self.values[0])
    }

    /// Determinant of a 2x2 matrix.
    pub fn determinant(&self) -> CoreResult<Real> {
        self.require_2x2("determinant")?;
        Ok(self.get(0, 0) * self.get(1, 1) - self.get(1, 0) * self.get(0, 1))
    }

    /// Inverse of a 2x2 matrix. Near-singular input is rejected rather than
    /// producing infinities.
    pub fn invert(&self) -> CoreResult<Matrix> {
        self.require_2x2("invert")?;
        let det = self.determinant()?;
        if !det.is_finite() || det.abs() <= SINGULAR_DETERMINANT {
            return Err(CoreError::Singular { determinant: det });
        }

        let adjugate = Matrix {
            columns: 2,
            rows: 2,
            values: vec![
                self.get(1, 1),
                -self.get(0, 1),
                -self.get(1, 0),
                self.get(0, 0),
            ],
        };
        Ok(adjugate.scale(1.0 / det))
    }

    fn require_2x2(&self, op: &'static str) -> CoreResult<()> {
        if self.shape() != (2, 2) {
            return Err(CoreError::Not2x2 {
                op,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }

    fn mismatch(&self, op: &'static str, other: &Matrix) -> CoreError {
        CoreError::ShapeMismatch {
            op,
            left_columns: self.columns,
            left_rows: self.rows,
            right_columns: other.columns,
            right_rows: other.rows,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                write!(f, "{:>6.2}  ", self.get(column, row))?;
            }
            if row + 1 != self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
