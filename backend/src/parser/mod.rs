//! CSV ingestion for uploaded matrices.
//!
//! Reads comma-separated text with standard quoting into rows of string
//! cells. There is no header row: every record is a matrix row. Records must
//! all have the same number of fields as the first one; the square check
//! itself lives in [`crate::validation`].

use std::io::Read;
use std::path::Path;

use crate::error::{IngestionError, MatrixError};
use crate::models::Matrix;

/// Parse CSV from a reader into rows of cells.
pub fn parse_rows<R: Read>(mut reader: R) -> Result<Vec<Vec<String>>, IngestionError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| IngestionError::Csv(format!("Cannot read CSV: {}", e)))?;
    parse_csv(&bytes)
}

/// Parse CSV bytes into rows of cells.
///
/// Quoting is strict: a `"` inside an unquoted field, text between a closing
/// quote and the next delimiter, or a quoted field left open at the end of
/// input is an error.
///
/// # Example
/// ```ignore
/// use csvmatrix::parse_csv;
///
/// let rows = parse_csv(b"1,2\n3,4\n").unwrap();
/// assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
/// ```
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>, IngestionError> {
    check_quoting(bytes)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

// =============================================================================
// Quote checking
// =============================================================================

const BARE_QUOTE: &str = "bare \" in non-quoted-field";
const BAD_QUOTE: &str = "extraneous or missing \" in quoted-field";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just read a `"` inside a quoted field.
    QuoteInQuoted,
}

fn quote_error(line: usize, column: usize, message: &str) -> IngestionError {
    IngestionError::Csv(format!(
        "parse error on line {}, column {}: {}",
        line, column, message
    ))
}

/// Reject the malformed quoting the `csv` reader would otherwise accept.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
fn check_quoting(bytes: &[u8]) -> Result<(), IngestionError> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut column = 0;
    // Position of the quote that opened the current quoted field.
    let mut opened_at = (1, 1);

    for (i, &b) in bytes.iter().enumerate() {
        // UTF-8 continuation bytes belong to the previous character.
        if b & 0xC0 != 0x80 {
            column += 1;
        }

        state = match (state, b) {
            (QuoteState::FieldStart, b'"') => {
                opened_at = (line, column);
                QuoteState::Quoted
            }
            (QuoteState::FieldStart, b',' | b'\n' | b'\r') => QuoteState::FieldStart,
            (QuoteState::FieldStart, _) => QuoteState::Unquoted,

            (QuoteState::Unquoted, b'"') => return Err(quote_error(line, column, BARE_QUOTE)),
            (QuoteState::Unquoted, b',' | b'\n') => QuoteState::FieldStart,
            (QuoteState::Unquoted, _) => QuoteState::Unquoted,

            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,

            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b',' | b'\n') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, b'\r') if bytes.get(i + 1).map_or(true, |&n| n == b'\n') => {
                QuoteState::QuoteInQuoted
            }
            (QuoteState::QuoteInQuoted, _) => return Err(quote_error(line, column, BAD_QUOTE)),
        };

        if b == b'\n' {
            line += 1;
            column = 0;
        }
    }

    if state == QuoteState::Quoted {
        return Err(quote_error(opened_at.0, opened_at.1, BAD_QUOTE));
    }

    Ok(())
}

/// Parse CSV bytes and check that they form a square matrix.
pub fn parse_matrix(bytes: &[u8]) -> Result<Matrix, MatrixError> {
    let rows = parse_csv(bytes)?;
    Ok(Matrix::from_rows(rows)?)
}

/// Read a CSV file from disk and check that it forms a square matrix.
pub fn parse_matrix_file<P: AsRef<Path>>(path: P) -> Result<Matrix, MatrixError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| {
        IngestionError::Csv(format!("Cannot read file '{}': {}", path.as_ref().display(), e))
    })?;
    parse_matrix(&bytes)
}
