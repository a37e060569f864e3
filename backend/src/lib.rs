//! # csvmatrix - Matrix operations on uploaded CSV files
//!
//! csvmatrix is a small HTTP service. A client uploads a square matrix as
//! CSV and gets back the result of one operation as plain text.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Multipart  │────▶│   Parser    │────▶│   Square    │────▶│  Operation  │
//! │   "file"    │     │    (CSV)    │     │    check    │     │ (text body) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use csvmatrix::{run_bytes, Operation};
//!
//! let result = run_bytes(Operation::Invert, b"1,2\n3,4\n").unwrap();
//! assert_eq!(result.body, "1,3\n2,4\n");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Server configuration
//! - [`models`] - Matrix types
//! - [`parser`] - CSV ingestion
//! - [`validation`] - Square-matrix check
//! - [`transform`] - Operations and pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Operations
pub mod transform;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    IngestionError,
    MatrixError,
    MatrixResult,
    ParseError,
    ServerError,
    ShapeError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Matrix, NumericMatrix};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{ServerConfig, DEFAULT_PORT, FILE_FIELD};

// =============================================================================
// Re-exports - Parsing & validation
// =============================================================================

pub use parser::{parse_csv, parse_matrix, parse_matrix_file, parse_rows};
pub use validation::validate_square;

// =============================================================================
// Re-exports - Operations
// =============================================================================

pub use transform::operations::{echo, flatten, invert, multiply, sum};
pub use transform::{
    operations_description,
    run_bytes,
    run_file,
    run_matrix,
    Operation,
    PipelineResult,
};

// Server
pub mod server {
    pub use crate::api::server::{build_router, start_server};
}
