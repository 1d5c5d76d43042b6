//! High-level conversion pipeline.
//!
//! Combines the steps of one conversion: read the input worksheet, build
//! a fresh output template, run the row transformer, and (optionally)
//! serialize the result. Each conversion owns its own
//! [`CoretaxWorkbook`]; nothing is shared or retained between calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use coretax_convert::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! let report = convert_file(
//!     Path::new("invoices.xlsx"),
//!     Path::new("Coretax_Import.xlsx"),
//!     &ConvertOptions::default(),
//! )?;
//! println!("Converted {} invoice lines", report.row_count);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::logs::{log_info, log_success};
use crate::error::PipelineResult;
use crate::reader::{read_sheet_from_bytes, read_sheet_from_path, SheetData};
use crate::writer;

use super::mapper::transform;
use super::template::CoretaxWorkbook;

/// Options for one conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Read this worksheet instead of the first one.
    pub sheet: Option<String>,
}

/// Result of one conversion, before serialization.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The populated output structure.
    pub workbook: CoretaxWorkbook,
    /// Name of the input worksheet that was read.
    pub sheet_name: String,
    /// Number of invoice lines converted.
    pub row_count: usize,
}

/// Convert an invoice list file into the in-memory Coretax structure.
pub fn convert_path(path: &Path, options: &ConvertOptions) -> PipelineResult<ConversionResult> {
    log_info(format!("Reading workbook: {}", path.display()));
    let sheet = read_sheet_from_path(path, options.sheet.as_deref())?;
    Ok(convert_sheet(&sheet))
}

/// Convert in-memory `.xlsx` bytes (the upload path).
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> PipelineResult<ConversionResult> {
    log_info(format!("Reading uploaded workbook ({} bytes)", bytes.len()));
    let sheet = read_sheet_from_bytes(bytes, options.sheet.as_deref())?;
    Ok(convert_sheet(&sheet))
}

/// Convert a file and write the Coretax workbook next to it.
///
/// Returns the same report as [`convert_path`]; on any error no output
/// file is produced.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> PipelineResult<ConversionResult> {
    let result = convert_path(input, options)?;
    writer::save_to_path(&result.workbook, output)?;
    log_success(format!("Saved Coretax workbook: {}", output.display()));
    Ok(result)
}

/// Core conversion over an already-materialized sheet.
///
/// Total: any grid converts, row for row, whatever its cells hold.
pub fn convert_sheet(sheet: &SheetData) -> ConversionResult {
    log_info(format!(
        "Worksheet '{}': {} data rows",
        sheet.name,
        sheet.data_row_count()
    ));

    let mut workbook = CoretaxWorkbook::new();
    transform(sheet, &mut workbook);

    log_success(format!("Converted {} invoice lines", workbook.row_count()));

    ConversionResult {
        row_count: workbook.row_count(),
        sheet_name: sheet.name.clone(),
        workbook,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use crate::transform::template::{DETAIL_SHEET, FAKTUR_SHEET};
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    /// Write a small sample-layout input file: header row plus two
    /// invoice lines spread over columns A..AD.
    fn write_sample_input(path: &std::path::Path) {
        let mut wb = Workbook::new();
        let sheet = wb.add_worksheet();
        for col in 0..30u16 {
            sheet.write_string(0, col, format!("Col{}", col + 1)).unwrap();
        }
        for row in 1..=2u32 {
            sheet.write_number(row, 0, row as f64).unwrap();
            sheet.write_string(row, 17, "Jasa Konsultasi").unwrap();
            sheet.write_string(row, 19, "Konsultasi Pajak").unwrap();
            sheet.write_number(row, 21, 1500000.4).unwrap();
            sheet.write_number(row, 26, 11.0).unwrap();
        }
        wb.save(path).unwrap();
    }

    #[test]
    fn test_convert_path_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("invoices.xlsx");
        write_sample_input(&input);

        let result = convert_path(&input, &ConvertOptions::default()).unwrap();
        assert_eq!(result.row_count, 2);
        assert_eq!(result.workbook.faktur.len(), 2);
        assert_eq!(result.workbook.detail.len(), 2);
        assert_eq!(
            result.workbook.detail[0].cell(6),
            &CellValue::Number(1500000.0)
        );
    }

    #[test]
    fn test_convert_file_writes_two_sheet_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("invoices.xlsx");
        let output = dir.path().join("out.xlsx");
        write_sample_input(&input);

        convert_file(&input, &output, &ConvertOptions::default()).unwrap();

        let names = crate::reader::sheet_names(&output).unwrap();
        assert_eq!(names, vec![FAKTUR_SHEET, DETAIL_SHEET]);
    }

    #[test]
    fn test_convert_bytes_matches_convert_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("invoices.xlsx");
        write_sample_input(&input);
        let bytes = std::fs::read(&input).unwrap();

        let from_path = convert_path(&input, &ConvertOptions::default()).unwrap();
        let from_bytes = convert_bytes(&bytes, &ConvertOptions::default()).unwrap();
        assert_eq!(from_path.workbook, from_bytes.workbook);
    }

    #[test]
    fn test_missing_input_aborts_with_no_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("nope.xlsx");
        let output = dir.path().join("out.xlsx");

        let result = convert_file(&input, &output, &ConvertOptions::default());
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_named_sheet_selection() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("invoices.xlsx");

        let mut wb = Workbook::new();
        wb.add_worksheet().set_name("Notes").unwrap();
        let data = wb.add_worksheet();
        data.set_name("Invoices").unwrap();
        data.write_string(0, 0, "Baris").unwrap();
        data.write_number(1, 0, 1.0).unwrap();
        wb.save(&input).unwrap();

        let options = ConvertOptions { sheet: Some("Invoices".to_string()) };
        let result = convert_path(&input, &options).unwrap();
        assert_eq!(result.sheet_name, "Invoices");
        assert_eq!(result.row_count, 1);

        // Default takes the first sheet, which here has no data rows.
        let default = convert_path(&input, &ConvertOptions::default()).unwrap();
        assert_eq!(default.sheet_name, "Notes");
        assert_eq!(default.row_count, 0);
    }
}
