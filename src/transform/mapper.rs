//! Row transformation: sample invoice layout to Coretax layout.
//!
//! One input data row produces one row on each output sheet:
//!
//! - `Faktur` takes input columns 1-17 verbatim.
//! - `DetailFaktur` takes column 1 (row id) and column 18 (goods/services
//!   flag) verbatim, the fixed item code, and columns 20-30 remapped via
//!   [`DETAIL_COLUMN_MAP`], rounding the amount columns to whole numbers.
//!
//! The transformation is deliberately total: short rows read as empty
//! cells and non-numeric values in amount columns pass through unrounded,
//! so one bad cell never aborts a whole conversion.

use crate::models::{CellValue, DetailRow, FakturRow, DETAIL_WIDTH, FAKTUR_WIDTH};
use crate::reader::SheetData;

use super::template::{CoretaxWorkbook, DEFAULT_ITEM_CODE};

// =============================================================================
// Column Mapping
// =============================================================================

/// One entry of the detail-sheet column mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// 1-based input column.
    pub source: usize,
    /// 1-based output column on `DetailFaktur`.
    pub target: usize,
    /// Round the value to the nearest whole number.
    pub rounded: bool,
}

const fn map(source: usize, target: usize, rounded: bool) -> ColumnMapping {
    ColumnMapping { source, target, rounded }
}

/// Input column carrying the row id (`Baris`), copied to both sheets.
pub const ROW_ID_COLUMN: usize = 1;

/// Input column carrying the goods/services flag (`Barang.Jasa`).
pub const ITEM_KIND_COLUMN: usize = 18;

/// Static source-to-target mapping for `DetailFaktur` columns 4-14.
///
/// Single source of truth for the layout remap; the rounded columns are
/// the currency amounts (unit price, quantity, discount, tax bases, PPN,
/// PPnBM) while names, units, and tariff percentages pass through as-is.
pub const DETAIL_COLUMN_MAP: [ColumnMapping; 11] = [
    map(20, 4, false),  // Nama Barang.Jasa
    map(21, 5, false),  // Nama Satuan Ukur
    map(22, 6, true),   // Harga Satuan
    map(23, 7, true),   // Jumlah Barang Jasa
    map(24, 8, true),   // Total Diskon
    map(25, 9, true),   // DPP
    map(26, 10, true),  // DPP Nilai Lain
    map(27, 11, false), // Tarif PPN
    map(28, 12, true),  // PPN
    map(29, 13, false), // Tarif PPnBM
    map(30, 14, true),  // PPnBM
];

// =============================================================================
// Rounding
// =============================================================================

/// Round a cell to the nearest whole number, leniently.
///
/// Absent stays absent (never coerced to zero) and anything without a
/// numeric view passes through unchanged.
pub fn round_to_whole(value: &CellValue) -> CellValue {
    if value.is_empty() {
        return CellValue::Empty;
    }
    match value.as_f64() {
        Some(n) => CellValue::Number(n.round()),
        None => value.clone(),
    }
}

// =============================================================================
// Row Transformer
// =============================================================================

/// Populate both output sheets from the input sheet's data rows.
///
/// Row 1 of the input is the header row and is skipped; data row N lands
/// at index N-1 of both output collections, preserving input order.
pub fn transform(sheet: &SheetData, workbook: &mut CoretaxWorkbook) {
    for row in 2..=sheet.max_row() {
        workbook.push(faktur_row(sheet, row), detail_row(sheet, row));
    }
}

fn faktur_row(sheet: &SheetData, row: usize) -> FakturRow {
    FakturRow(std::array::from_fn::<_, FAKTUR_WIDTH, _>(|i| {
        sheet.cell(row, i + 1).clone()
    }))
}

fn detail_row(sheet: &SheetData, row: usize) -> DetailRow {
    let mut cells: [CellValue; DETAIL_WIDTH] = Default::default();

    cells[0] = sheet.cell(row, ROW_ID_COLUMN).clone();
    cells[1] = sheet.cell(row, ITEM_KIND_COLUMN).clone();
    cells[2] = CellValue::Text(DEFAULT_ITEM_CODE.to_string());

    for mapping in &DETAIL_COLUMN_MAP {
        let value = sheet.cell(row, mapping.source);
        cells[mapping.target - 1] = if mapping.rounded {
            round_to_whole(value)
        } else {
            value.clone()
        };
    }

    DetailRow(cells)
}
