//! Error types for the Coretax conversion pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ReadError`] - Input workbook opening/parsing errors
//! - [`WriteError`] - Output workbook serialization errors
//! - [`PipelineError`] - Top-level orchestration errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations, allowing `?`
//! to work across error boundaries. The row transformation itself has no
//! error type: it is total over any input grid, so junk cells flow through
//! instead of aborting a conversion.

use thiserror::Error;

// =============================================================================
// Input Reading Errors
// =============================================================================

/// Errors while opening or parsing the input workbook.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid spreadsheet container.
    #[error("Not a valid spreadsheet: {0}")]
    InvalidWorkbook(String),

    /// A worksheet was requested by name and does not exist.
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// The workbook contains no worksheets at all.
    #[error("Workbook has no worksheets")]
    NoSheets,
}

impl From<calamine::Error> for ReadError {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(e) => ReadError::Io(e),
            other => ReadError::InvalidWorkbook(other.to_string()),
        }
    }
}

impl From<calamine::XlsxError> for ReadError {
    fn from(err: calamine::XlsxError) -> Self {
        ReadError::InvalidWorkbook(err.to_string())
    }
}

// =============================================================================
// Output Writing Errors
// =============================================================================

/// Errors while serializing the output workbook.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The xlsx writer rejected the workbook.
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Failed to write the output file.
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the main error type returned by the functions in
/// [`crate::transform::pipeline`]. A failed conversion produces no output
/// file; there is no partial write to clean up.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input reading error.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Output writing error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Conversion error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input reading.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for output writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for conversions.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
