//! High-level pipeline API: CSV bytes in, response body out.
//!
//! Combines ingestion, the square check and one operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use csvmatrix::{run_bytes, Operation};
//!
//! let result = run_bytes(Operation::Sum, b"1,2\n3,4\n").unwrap();
//! assert_eq!(result.body, "10");
//! ```

use serde::Serialize;
use std::path::Path;

use super::operations::Operation;
use crate::error::MatrixResult;
use crate::models::Matrix;
use crate::parser::{parse_matrix, parse_matrix_file};

/// Result of one operation run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// Operation that produced the body
    pub operation: Operation,

    /// Number of rows (and columns) of the input
    pub dimension: usize,

    /// Plain-text response body
    pub body: String,
}

/// Parse uploaded CSV bytes and apply `operation`.
pub fn run_bytes(operation: Operation, bytes: &[u8]) -> MatrixResult<PipelineResult> {
    let matrix = parse_matrix(bytes)?;
    run_matrix(operation, &matrix)
}

/// Same as [`run_bytes`] but reads the CSV from a file.
pub fn run_file<P: AsRef<Path>>(operation: Operation, path: P) -> MatrixResult<PipelineResult> {
    let matrix = parse_matrix_file(path)?;
    run_matrix(operation, &matrix)
}

/// Apply `operation` to an already validated matrix.
pub fn run_matrix(operation: Operation, matrix: &Matrix) -> MatrixResult<PipelineResult> {
    let body = operation.apply(matrix)?;
    Ok(PipelineResult {
        operation,
        dimension: matrix.dimension(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use std::io::Write;

    #[test]
    fn test_scenario_three_by_three() {
        let csv = b"1,2,3\n4,5,6\n7,8,9\n";
        let body = |op| run_bytes(op, csv).unwrap().body;

        assert_eq!(body(Operation::Echo), "1,2,3\n4,5,6\n7,8,9\n");
        assert_eq!(body(Operation::Flatten), "1,2,3,4,5,6,7,8,9");
        assert_eq!(body(Operation::Invert), "1,4,7\n2,5,8\n3,6,9\n");
        assert_eq!(body(Operation::Sum), "45");
        assert_eq!(body(Operation::Multiply), "362880");
    }

    #[test]
    fn test_non_square_every_operation() {
        for op in Operation::ALL {
            let err = run_bytes(op, b"1,2,3\n4,5,6\n").unwrap_err();
            assert_eq!(err.body(), "error row count and col count not equal");
        }
    }

    #[test]
    fn test_invalid_cell_only_fails_numeric() {
        let csv = b"1,2,3\n4,abc,6\n7,8,9\n";
        for op in Operation::ALL {
            let result = run_bytes(op, csv);
            if op.is_numeric() {
                let err = result.unwrap_err();
                assert!(matches!(err, MatrixError::Parse(_)));
                assert!(err.body().ends_with(": Invalid Input"));
            } else {
                assert!(result.is_ok());
            }
        }
    }

    #[test]
    fn test_run_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"2,3\n4,5\n").unwrap();

        let result = run_file(Operation::Multiply, file.path()).unwrap();
        assert_eq!(result.dimension, 2);
        assert_eq!(result.body, "120");
    }
}
