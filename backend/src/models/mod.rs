//! Domain models for the csvmatrix service.
//!
//! - [`Matrix`] - Square grid of string cells, as uploaded
//! - [`NumericMatrix`] - Same grid with every cell read as an `i64`
//!
//! A [`Matrix`] can only be built through [`Matrix::from_rows`], which runs
//! the square check, so every operation can index it freely.

use serde::Serialize;

use crate::error::{ParseError, ShapeError};
use crate::validation::validate_square;

// =============================================================================
// Matrix
// =============================================================================

/// A square matrix of string cells.
///
/// Invariant: `rows.len() >= 1` and every row has `rows.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix {
    rows: Vec<Vec<String>>,
}

impl Matrix {
    /// Build a matrix from CSV rows, rejecting anything that is not square.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, ShapeError> {
        validate_square(&rows)?;
        Ok(Self { rows })
    }

    /// Number of rows (and columns).
    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell at (`row`, `col`), or `None` outside the matrix.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }

    /// Output cell (i, j) is input cell (j, i).
    pub fn transpose(&self) -> Matrix {
        let n = self.dimension();
        let rows = (0..n)
            .map(|i| (0..n).map(|j| self.rows[j][i].clone()).collect())
            .collect();
        Matrix { rows }
    }

    /// Read every cell as a base-10 `i64`, stopping at the first failure.
    pub fn to_numeric(&self) -> Result<NumericMatrix, ParseError> {
        let n = self.dimension();
        let mut values = Vec::with_capacity(n * n);
        for cell in self.cells() {
            let value = cell
                .parse::<i64>()
                .map_err(|e| ParseError::invalid_cell(cell, e))?;
            values.push(value);
        }
        Ok(NumericMatrix { values })
    }
}

// =============================================================================
// Numeric Matrix
// =============================================================================

/// A square matrix of `i64`, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericMatrix {
    values: Vec<i64>,
}

impl NumericMatrix {
    /// Values in row-major order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Sum of all cells with two's-complement wraparound.
    pub fn wrapping_sum(&self) -> i64 {
        self.values.iter().fold(0i64, |acc, v| acc.wrapping_add(*v))
    }

    /// Product of all cells with two's-complement wraparound.
    pub fn wrapping_product(&self) -> i64 {
        self.values.iter().fold(1i64, |acc, v| acc.wrapping_mul(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_from_rows_square() {
        let m = Matrix::from_rows(grid(&[&["1", "2"], &["3", "4"]])).unwrap();
        assert_eq!(m.dimension(), 2);
        assert_eq!(m.cell(1, 0), Some("3"));
        assert_eq!(m.cell(2, 0), None);
        assert_eq!(m.cell(0, 2), None);
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        let err = Matrix::from_rows(grid(&[&["1", "2", "3"], &["4", "5", "6"]])).unwrap_err();
        assert_eq!(err, ShapeError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn test_transpose_is_self_inverse() {
        let m = Matrix::from_rows(grid(&[
            &["a", "b", "c"],
            &["d", "e", "f"],
            &["g", "h", "i"],
        ]))
        .unwrap();

        let t = m.transpose();
        assert_eq!(t.rows()[0], vec!["a", "d", "g"]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_to_numeric_stops_on_first_bad_cell() {
        let m = Matrix::from_rows(grid(&[&["1", "x"], &["y", "4"]])).unwrap();
        match m.to_numeric().unwrap_err() {
            ParseError::InvalidCell { cell, .. } => assert_eq!(cell, "x"),
        }
    }

    #[test]
    fn test_wrapping_arithmetic() {
        let m = Matrix::from_rows(grid(&[&["9223372036854775807", "1"], &["0", "0"]])).unwrap();
        let numeric = m.to_numeric().unwrap();
        assert_eq!(numeric.wrapping_sum(), i64::MIN);
        assert_eq!(numeric.wrapping_product(), 0);
    }

    #[test]
    fn test_negative_cells() {
        let m = Matrix::from_rows(grid(&[&["-2", "3"], &["-1", "1"]])).unwrap();
        let numeric = m.to_numeric().unwrap();
        assert_eq!(numeric.values(), &[-2, 3, -1, 1]);
        assert_eq!(numeric.wrapping_sum(), 1);
        assert_eq!(numeric.wrapping_product(), 6);
    }
}
