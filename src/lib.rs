//! # Coretax Convert - invoice list to Coretax import format
//!
//! Converts an invoice list spreadsheet ("sample" layout) into the
//! two-sheet workbook the DJP Coretax importer accepts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Invoice List│────▶│   Reader    │────▶│  Transform  │────▶│   Coretax   │
//! │   (.xlsx)   │     │ (calamine)  │     │ (fixed map) │     │ 2-sheet xlsx│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coretax_convert::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() {
//!     let report = convert_file(
//!         Path::new("invoices.xlsx"),
//!         Path::new("Coretax_Import.xlsx"),
//!         &ConvertOptions::default(),
//!     ).unwrap();
//!     println!("Converted {} invoice lines", report.row_count);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (CellValue, FakturRow, DetailRow)
//! - [`reader`] - Input workbook reading with calamine
//! - [`transform`] - Template, column mapping, and pipeline
//! - [`writer`] - Output workbook serialization with rust_xlsxwriter
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Input
pub mod reader;

// Transformation
pub mod transform;

// Output
pub mod writer;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{PipelineError, ReadError, ServerError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CellValue, DetailRow, FakturRow, DETAIL_WIDTH, FAKTUR_WIDTH};

// =============================================================================
// Re-exports - Reader
// =============================================================================

pub use reader::{read_sheet_from_bytes, read_sheet_from_path, sheet_names, SheetData};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::mapper::{round_to_whole, transform, ColumnMapping, DETAIL_COLUMN_MAP};
pub use transform::pipeline::{
    convert_bytes, convert_file, convert_path, convert_sheet, ConversionResult, ConvertOptions,
};
pub use transform::template::{
    CoretaxWorkbook, DEFAULT_ITEM_CODE, DETAIL_HEADERS, FAKTUR_HEADERS, SELLER_TAX_ID,
};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{save_to_path, write_to_buffer};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{download_filename, error_response};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
