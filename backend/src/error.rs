//! Error types for the csvmatrix service.
//!
//! This module defines the error hierarchy for one request and for bootstrap:
//!
//! - [`IngestionError`] - Missing or malformed upload
//! - [`ShapeError`] - Uploaded grid is not a square matrix
//! - [`ParseError`] - A cell is not a 64-bit integer (Sum/Multiply)
//! - [`MatrixError`] - Top-level request error
//! - [`ConfigError`] - Invalid configuration value
//! - [`ServerError`] - Startup and listener errors
//!
//! The `Display` of a [`MatrixError`] is the text written after the `error `
//! prefix of a response body, so these messages are part of the wire format.

use axum::http::StatusCode;
use thiserror::Error;

// =============================================================================
// Ingestion Errors
// =============================================================================

/// Errors while extracting and reading the uploaded CSV.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Request is not a readable multipart/form-data body.
    #[error("{0}")]
    Multipart(String),

    /// No `file` field in the form.
    #[error("no such file: multipart field \"file\" is missing")]
    MissingFile,

    /// CSV payload could not be read.
    #[error("{0}")]
    Csv(String),
}

impl From<csv::Error> for IngestionError {
    fn from(err: csv::Error) -> Self {
        IngestionError::Csv(err.to_string())
    }
}

// =============================================================================
// Shape Errors
// =============================================================================

/// Errors from the square-matrix check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Upload had no rows at all.
    #[error("matrix has no rows")]
    Empty,

    /// Row count differs from the column count of the first row.
    #[error("row count and col count not equal")]
    NotSquare { rows: usize, cols: usize },

    /// A later row does not have as many cells as there are rows.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors while reading cells as integers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Cell is not a base-10 `i64`.
    #[error("parsing \"{cell}\": {message}: Invalid Input")]
    InvalidCell { cell: String, message: String },
}

impl ParseError {
    pub fn invalid_cell(cell: &str, err: std::num::ParseIntError) -> Self {
        ParseError::InvalidCell {
            cell: cell.to_string(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Request Errors (top-level)
// =============================================================================

/// Any error that ends an operation request.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl MatrixError {
    /// Status used when structured status codes are enabled.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MatrixError::Ingestion(_) => StatusCode::BAD_REQUEST,
            MatrixError::Shape(_) | MatrixError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Response body text, including the `error ` prefix.
    pub fn body(&self) -> String {
        format!("error {}", self)
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for a single operation request.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_body_is_literal() {
        let err: MatrixError = ShapeError::NotSquare { rows: 2, cols: 3 }.into();
        assert_eq!(err.body(), "error row count and col count not equal");
    }

    #[test]
    fn test_parse_error_format() {
        let parse_err = "abc".parse::<i64>().unwrap_err();
        let err: MatrixError = ParseError::invalid_cell("abc", parse_err).into();
        let body = err.body();

        assert!(body.starts_with("error parsing \"abc\": "));
        assert!(body.ends_with(": Invalid Input"));
    }

    #[test]
    fn test_status_codes() {
        let ingestion: MatrixError = IngestionError::MissingFile.into();
        assert_eq!(ingestion.status_code(), StatusCode::BAD_REQUEST);

        let shape: MatrixError = ShapeError::Empty.into();
        assert_eq!(shape.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
