//! Output workbook serialization.
//!
//! Renders a [`CoretaxWorkbook`] into a real `.xlsx` container with
//! rust_xlsxwriter, either to a file on disk (CLI path) or to an
//! in-memory buffer (HTTP download path). Sheet order is fixed at
//! {Faktur, DetailFaktur}, header cells are bold, and the seller NPWP and
//! item code are written as explicit string cells so the importer sees
//! text rather than a number with the leading zeros stripped.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::WriteResult;
use crate::models::CellValue;
use crate::transform::template::{
    CoretaxWorkbook, DETAIL_DATA_FIRST_ROW, DETAIL_HEADERS, DETAIL_HEADER_ROW, DETAIL_SHEET,
    FAKTUR_DATA_FIRST_ROW, FAKTUR_HEADERS, FAKTUR_HEADER_ROW, FAKTUR_SHEET, SELLER_TAX_ID,
    SELLER_TAX_ID_LABEL,
};

/// Display format for date/time cells.
const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Serialize the workbook to a file.
pub fn save_to_path(workbook: &CoretaxWorkbook, path: &Path) -> WriteResult<()> {
    let mut rendered = render(workbook)?;
    rendered.save(path)?;
    Ok(())
}

/// Serialize the workbook to in-memory `.xlsx` bytes.
pub fn write_to_buffer(workbook: &CoretaxWorkbook) -> WriteResult<Vec<u8>> {
    let mut rendered = render(workbook)?;
    Ok(rendered.save_to_buffer()?)
}

fn render(workbook: &CoretaxWorkbook) -> Result<Workbook, XlsxError> {
    let bold = Format::new().set_bold();
    let date = Format::new().set_num_format(DATE_FORMAT);

    let mut out = Workbook::new();

    // Faktur: seller identity row, blank row, bold headers, data from row 4.
    let faktur = out.add_worksheet();
    faktur.set_name(FAKTUR_SHEET)?;
    faktur.write_string(0, 0, SELLER_TAX_ID_LABEL)?;
    faktur.write_string(0, 2, SELLER_TAX_ID)?;
    write_headers(faktur, FAKTUR_HEADER_ROW - 1, &FAKTUR_HEADERS, &bold)?;
    for (i, row) in workbook.faktur.iter().enumerate() {
        write_row(faktur, FAKTUR_DATA_FIRST_ROW - 1 + i as u32, &row.0, &date)?;
    }

    // DetailFaktur: bold headers, data from row 2.
    let detail = out.add_worksheet();
    detail.set_name(DETAIL_SHEET)?;
    write_headers(detail, DETAIL_HEADER_ROW - 1, &DETAIL_HEADERS, &bold)?;
    for (i, row) in workbook.detail.iter().enumerate() {
        write_row(detail, DETAIL_DATA_FIRST_ROW - 1 + i as u32, &row.0, &date)?;
    }

    Ok(out)
}

fn write_headers(
    sheet: &mut Worksheet,
    row: u32,
    headers: &[&str],
    bold: &Format,
) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *header, bold)?;
    }
    Ok(())
}

fn write_row(
    sheet: &mut Worksheet,
    row: u32,
    cells: &[CellValue],
    date: &Format,
) -> Result<(), XlsxError> {
    for (col, value) in cells.iter().enumerate() {
        write_cell(sheet, row, col as u16, value, date)?;
    }
    Ok(())
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    date: &Format,
) -> Result<(), XlsxError> {
    match value {
        // Blank cells stay blank in the output.
        CellValue::Empty => {}
        CellValue::Text(s) => {
            sheet.write_string(row, col, s.as_str())?;
        }
        CellValue::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        CellValue::DateTime(dt) => {
            sheet.write_datetime_with_format(row, col, dt, date)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, DetailRow, FakturRow, DETAIL_WIDTH, FAKTUR_WIDTH};
    use crate::transform::template::DEFAULT_ITEM_CODE;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn sample_workbook() -> CoretaxWorkbook {
        let mut faktur: [CellValue; FAKTUR_WIDTH] = Default::default();
        faktur[0] = CellValue::from(1.0);
        faktur[1] = CellValue::from("2024-05-01");

        let mut detail: [CellValue; DETAIL_WIDTH] = Default::default();
        detail[0] = CellValue::from(1.0);
        detail[1] = CellValue::from("Jasa Konsultasi");
        detail[2] = CellValue::Text(DEFAULT_ITEM_CODE.to_string());
        detail[5] = CellValue::from(1500000.0);

        let mut wb = CoretaxWorkbook::new();
        wb.push(FakturRow(faktur), DetailRow(detail));
        wb
    }

    fn read_back(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        Xlsx::new(Cursor::new(bytes)).expect("output should be a valid xlsx")
    }

    #[test]
    fn test_sheet_names_and_order() {
        let bytes = write_to_buffer(&sample_workbook()).unwrap();
        let workbook = read_back(bytes);
        assert_eq!(workbook.sheet_names(), vec![FAKTUR_SHEET, DETAIL_SHEET]);
    }

    #[test]
    fn test_seller_identity_row() {
        let bytes = write_to_buffer(&sample_workbook()).unwrap();
        let mut workbook = read_back(bytes);
        let range = workbook.worksheet_range(FAKTUR_SHEET).unwrap();

        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String(SELLER_TAX_ID_LABEL.to_string()))
        );
        // The NPWP must come back as text with its leading zeros intact.
        assert_eq!(
            range.get_value((0, 2)),
            Some(&Data::String(SELLER_TAX_ID.to_string()))
        );
    }

    #[test]
    fn test_header_rows_contain_the_fixed_literals() {
        let bytes = write_to_buffer(&sample_workbook()).unwrap();
        let mut workbook = read_back(bytes);

        let faktur = workbook.worksheet_range(FAKTUR_SHEET).unwrap();
        for (col, header) in FAKTUR_HEADERS.iter().enumerate() {
            assert_eq!(
                faktur.get_value((FAKTUR_HEADER_ROW - 1, col as u32)),
                Some(&Data::String(header.to_string())),
                "Faktur header column {}",
                col + 1
            );
        }

        let detail = workbook.worksheet_range(DETAIL_SHEET).unwrap();
        for (col, header) in DETAIL_HEADERS.iter().enumerate() {
            assert_eq!(
                detail.get_value((DETAIL_HEADER_ROW - 1, col as u32)),
                Some(&Data::String(header.to_string())),
                "DetailFaktur header column {}",
                col + 1
            );
        }
    }

    #[test]
    fn test_item_code_round_trips_as_text() {
        let bytes = write_to_buffer(&sample_workbook()).unwrap();
        let mut workbook = read_back(bytes);
        let range = workbook.worksheet_range(DETAIL_SHEET).unwrap();

        // Row 2, column C: a string cell, not the number 310000.
        assert_eq!(
            range.get_value((DETAIL_DATA_FIRST_ROW - 1, 2)),
            Some(&Data::String(DEFAULT_ITEM_CODE.to_string()))
        );
    }

    #[test]
    fn test_data_rows_start_at_contract_rows() {
        let bytes = write_to_buffer(&sample_workbook()).unwrap();
        let mut workbook = read_back(bytes);

        let faktur = workbook.worksheet_range(FAKTUR_SHEET).unwrap();
        assert_eq!(
            faktur.get_value((FAKTUR_DATA_FIRST_ROW - 1, 0)),
            Some(&Data::Float(1.0))
        );

        let detail = workbook.worksheet_range(DETAIL_SHEET).unwrap();
        assert_eq!(
            detail.get_value((DETAIL_DATA_FIRST_ROW - 1, 5)),
            Some(&Data::Float(1500000.0))
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        // The container carries a creation timestamp, so compare the cell
        // data of two independent serializations rather than raw bytes.
        let wb = sample_workbook();
        let mut first = read_back(write_to_buffer(&wb).unwrap());
        let mut second = read_back(write_to_buffer(&wb).unwrap());

        for sheet in [FAKTUR_SHEET, DETAIL_SHEET] {
            let a = first.worksheet_range(sheet).unwrap();
            let b = second.worksheet_range(sheet).unwrap();
            assert!(
                a.used_cells().eq(b.used_cells()),
                "sheet {sheet} differs between runs"
            );
        }
    }
}
