//! Matrix operations
//!
//! The five operations a client can request, each turning a validated
//! [`Matrix`] into the plain-text response body.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::models::Matrix;

/// All available matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Re-emit the matrix as CSV
    Echo,

    /// All cells on one line, row-major
    Flatten,

    /// Transpose
    Invert,

    /// Sum of all cells as i64
    Sum,

    /// Product of all cells as i64
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Invert,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Flatten => "flatten",
            Operation::Invert => "invert",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
        }
    }

    /// HTTP route serving this operation.
    pub fn path(self) -> &'static str {
        match self {
            Operation::Echo => "/echo",
            Operation::Flatten => "/flatten",
            Operation::Invert => "/invert",
            Operation::Sum => "/sum",
            Operation::Multiply => "/multiply",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Echo => "Re-emit the matrix as CSV, one line per row",
            Operation::Flatten => "All cells on one comma-joined line, row-major",
            Operation::Invert => "Transpose the matrix",
            Operation::Sum => "Sum of all cells as a 64-bit integer",
            Operation::Multiply => "Product of all cells as a 64-bit integer",
        }
    }

    /// Whether the operation reads cells as integers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Operation::Sum | Operation::Multiply)
    }

    /// Apply the operation and render the response body.
    pub fn apply(self, matrix: &Matrix) -> Result<String, ParseError> {
        match self {
            Operation::Echo => Ok(echo(matrix)),
            Operation::Flatten => Ok(flatten(matrix)),
            Operation::Invert => Ok(invert(matrix)),
            Operation::Sum => sum(matrix),
            Operation::Multiply => multiply(matrix),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/').to_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

// =============================================================================
// Operation implementations
// =============================================================================

/// Rows joined by commas, every row terminated by a newline.
fn render_rows(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// `r1c1,r1c2\nr2c1,r2c2\n`
pub fn echo(matrix: &Matrix) -> String {
    render_rows(matrix.rows())
}

/// `r1c1,r1c2,r2c1,r2c2` with no trailing delimiter.
pub fn flatten(matrix: &Matrix) -> String {
    matrix.cells().collect::<Vec<_>>().join(",")
}

/// Transposed rows, every row terminated by a newline.
pub fn invert(matrix: &Matrix) -> String {
    render_rows(matrix.transpose().rows())
}

pub fn sum(matrix: &Matrix) -> Result<String, ParseError> {
    Ok(matrix.to_numeric()?.wrapping_sum().to_string())
}

pub fn multiply(matrix: &Matrix) -> Result<String, ParseError> {
    Ok(matrix.to_numeric()?.wrapping_product().to_string())
}

/// Get the list of all operations for documentation
pub fn operations_description() -> String {
    let mut out = String::from(
        "Available matrix operations:\n\n\
         | Operation | Route | Description |\n\
         |-----------|-------|-------------|\n",
    );
    for op in Operation::ALL {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            op.name(),
            op.path(),
            op.description()
        ));
    }
    out.push_str(
        "\nRoutes accept any HTTP method; send the CSV as multipart field \"file\":\n  \
         curl -F 'file=@matrix.csv' http://localhost:8080/echo",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(csv: &str) -> Matrix {
        crate::parser::parse_matrix(csv.as_bytes()).unwrap()
    }

    const SAMPLE: &str = "1,2,3\n4,5,6\n7,8,9\n";

    #[test]
    fn test_echo() {
        assert_eq!(echo(&matrix(SAMPLE)), "1,2,3\n4,5,6\n7,8,9\n");
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten(&matrix(SAMPLE)), "1,2,3,4,5,6,7,8,9");
        assert_eq!(flatten(&matrix("4,5,6\n1,2,3\n7,8,9\n")), "4,5,6,1,2,3,7,8,9");
    }

    #[test]
    fn test_flatten_cell_count() {
        let out = flatten(&matrix("a,b\nc,d\n"));
        assert_eq!(out.split(',').count(), 4);
        assert!(!out.ends_with(','));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert(&matrix(SAMPLE)), "1,4,7\n2,5,8\n3,6,9\n");
        assert_eq!(invert(&matrix("4,5,6\n1,2,3\n7,8,9\n")), "4,1,7\n5,2,8\n6,3,9\n");
    }

    #[test]
    fn test_invert_twice_is_echo() {
        let m = matrix("a,b,c\nd,e,f\ng,h,i\n");
        let twice = matrix(&invert(&matrix(&invert(&m))));
        assert_eq!(echo(&twice), echo(&m));
    }

    #[test]
    fn test_sum_and_multiply() {
        let m = matrix(SAMPLE);
        assert_eq!(sum(&m).unwrap(), "45");
        assert_eq!(multiply(&m).unwrap(), "362880");
    }

    #[test]
    fn test_multiply_single_one() {
        assert_eq!(multiply(&matrix("1\n")).unwrap(), "1");
    }

    #[test]
    fn test_sum_overflow_wraps() {
        let m = matrix("9223372036854775807,1\n0,0\n");
        assert_eq!(sum(&m).unwrap(), "-9223372036854775808");
    }

    #[test]
    fn test_invalid_cell() {
        let m = matrix("1,2,3\n4,abc,6\n7,8,9\n");

        let err = sum(&m).unwrap_err().to_string();
        assert!(err.contains("\"abc\""));
        assert!(err.ends_with(": Invalid Input"));
        assert!(multiply(&m).unwrap_err().to_string().ends_with(": Invalid Input"));

        // Non-numeric operations never parse cells.
        assert!(Operation::Echo.apply(&m).is_ok());
        assert!(Operation::Flatten.apply(&m).is_ok());
        assert!(Operation::Invert.apply(&m).is_ok());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sum".parse::<Operation>().unwrap(), Operation::Sum);
        assert_eq!("/invert".parse::<Operation>().unwrap(), Operation::Invert);
        assert_eq!("MULTIPLY".parse::<Operation>().unwrap(), Operation::Multiply);
        assert!("divide".parse::<Operation>().is_err());
    }

    #[test]
    fn test_operations_description() {
        let desc = operations_description();
        for op in Operation::ALL {
            assert!(desc.contains(op.path()));
        }
        assert!(desc.contains("any HTTP method"));
        assert!(!desc.contains("POST"));
    }
}
