//! Input workbook reading.
//!
//! Opens an `.xlsx` invoice list with calamine and materializes one
//! worksheet into a [`SheetData`] grid addressed the way the rest of the
//! pipeline thinks: 1-based rows and columns, row 1 being the header row.
//!
//! Reading is the only step of the conversion that can fail; everything
//! downstream is total over whatever grid comes out of here.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};

use crate::error::{ReadError, ReadResult};
use crate::models::CellValue;

// =============================================================================
// Sheet Data
// =============================================================================

/// One worksheet, fully materialized.
///
/// Cells are stored densely from A1 so that `cell(row, col)` matches the
/// spreadsheet's own addressing. Reads outside the populated area yield
/// [`CellValue::Empty`], which is how short rows flow through the
/// transformer without special cases.
#[derive(Debug, Clone)]
pub struct SheetData {
    /// Worksheet name as found in the workbook.
    pub name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    /// Build a sheet from rows of cells (row 1 first).
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { name: name.into(), rows }
    }

    /// Cell at a 1-based (row, col) address, `Empty` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .unwrap_or(EMPTY)
    }

    /// Highest populated 1-based row number (0 for a blank sheet).
    pub fn max_row(&self) -> usize {
        self.rows.len()
    }

    /// Number of data rows, i.e. everything below the header row.
    pub fn data_row_count(&self) -> usize {
        self.max_row().saturating_sub(1)
    }
}

// =============================================================================
// Workbook Opening
// =============================================================================

/// Read one worksheet from an `.xlsx` file on disk.
///
/// `sheet` selects a worksheet by name; `None` takes the first one, which
/// is what invoice exports put their data on.
pub fn read_sheet_from_path(path: &Path, sheet: Option<&str>) -> ReadResult<SheetData> {
    let mut workbook = open_workbook_auto(path)?;
    let name = pick_sheet(&workbook.sheet_names(), sheet)?;
    let range = workbook.worksheet_range(&name)?;
    Ok(materialize(&name, &range))
}

/// Read one worksheet from in-memory `.xlsx` bytes (the upload path).
pub fn read_sheet_from_bytes(bytes: &[u8], sheet: Option<&str>) -> ReadResult<SheetData> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;
    let name = pick_sheet(&workbook.sheet_names(), sheet)?;
    let range = workbook.worksheet_range(&name)?;
    Ok(materialize(&name, &range))
}

/// List the worksheet names of an `.xlsx` file.
pub fn sheet_names(path: &Path) -> ReadResult<Vec<String>> {
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names())
}

fn pick_sheet(names: &[String], wanted: Option<&str>) -> ReadResult<String> {
    match wanted {
        Some(name) => names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| ReadError::SheetNotFound(name.to_string())),
        None => names.first().cloned().ok_or(ReadError::NoSheets),
    }
}

/// Densify a calamine range into absolute A1-based rows.
///
/// Calamine ranges start at the first populated cell, not at A1, so the
/// leading blank rows and columns are padded back in to keep the fixed
/// column positions of the invoice layout intact.
fn materialize(name: &str, range: &Range<Data>) -> SheetData {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
    for source_row in range.rows() {
        let mut cells = vec![CellValue::Empty; col_offset];
        cells.extend(source_row.iter().map(cell_from_data));
        rows.push(cells);
    }

    SheetData::from_rows(name, rows)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(naive),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
