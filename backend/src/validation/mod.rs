//! Shape validation for uploaded matrices.
//!
//! Every operation needs a square grid: as many rows as the first row has
//! cells, and every other row the same length. Zero rows is rejected.

use crate::error::ShapeError;

/// Check that `rows` form a square matrix.
///
/// # Returns
/// * `Ok(())` if square
/// * `Err(ShapeError)` describing the first violation
///
/// # Example
/// ```ignore
/// use csvmatrix::validation::validate_square;
///
/// let rows = vec![vec!["1".to_string()]];
/// assert!(validate_square(&rows).is_ok());
/// ```
pub fn validate_square<T>(rows: &[Vec<T>]) -> Result<(), ShapeError> {
    let first = rows.first().ok_or(ShapeError::Empty)?;

    let row_count = rows.len();
    let col_count = first.len();
    if row_count != col_count {
        return Err(ShapeError::NotSquare {
            rows: row_count,
            cols: col_count,
        });
    }

    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.len() != row_count {
            return Err(ShapeError::Ragged {
                row: i,
                expected: row_count,
                found: row.len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_ok() {
        let rows = vec![vec![1, 2], vec![3, 4]];
        assert!(validate_square(&rows).is_ok());
    }

    #[test]
    fn test_single_cell_ok() {
        assert!(validate_square(&[vec!["1"]]).is_ok());
    }

    #[test]
    fn test_empty_rejected() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(validate_square(&rows), Err(ShapeError::Empty));
    }

    #[test]
    fn test_more_cols_than_rows() {
        let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(
            validate_square(&rows),
            Err(ShapeError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_more_rows_than_cols() {
        let rows = vec![vec![1], vec![2]];
        assert_eq!(
            validate_square(&rows),
            Err(ShapeError::NotSquare { rows: 2, cols: 1 })
        );
    }

    #[test]
    fn test_ragged_row_rejected() {
        let rows = vec![vec![1, 2], vec![3]];
        assert_eq!(
            validate_square(&rows),
            Err(ShapeError::Ragged { row: 1, expected: 2, found: 1 })
        );
    }
}
