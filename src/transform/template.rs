//! Coretax output template.
//!
//! The template is the fixed two-sheet structure the DJP Coretax importer
//! expects. Header text, the seller identity row, and the data start rows
//! are a verbatim contract: the importer matches them literally, so they
//! live here as constants rather than configuration.

use crate::models::{DetailRow, FakturRow};

// =============================================================================
// Fixed Sheet Contract
// =============================================================================

/// Name of the output header sheet.
pub const FAKTUR_SHEET: &str = "Faktur";

/// Name of the output line-item sheet.
pub const DETAIL_SHEET: &str = "DetailFaktur";

/// Label in `Faktur!A1`.
pub const SELLER_TAX_ID_LABEL: &str = "NPWP Penjual";

/// Seller NPWP in `Faktur!C1`. Stored as text so the leading zeros survive.
pub const SELLER_TAX_ID: &str = "0012328415631000";

/// Default goods/services code for `DetailFaktur` column 3.
///
/// Always written as a text cell; as a number the importer would reject it.
pub const DEFAULT_ITEM_CODE: &str = "310000";

/// 1-based row of the bold header row on the `Faktur` sheet.
pub const FAKTUR_HEADER_ROW: u32 = 3;

/// 1-based row of the first data row on the `Faktur` sheet.
pub const FAKTUR_DATA_FIRST_ROW: u32 = 4;

/// 1-based row of the bold header row on the `DetailFaktur` sheet.
pub const DETAIL_HEADER_ROW: u32 = 1;

/// 1-based row of the first data row on the `DetailFaktur` sheet.
pub const DETAIL_DATA_FIRST_ROW: u32 = 2;

/// Column headers of the `Faktur` sheet, row 3.
pub const FAKTUR_HEADERS: [&str; 17] = [
    "Baris",
    "Tanggal Faktur",
    "Jenis Faktur",
    "Kode Transaksi",
    "Keterangan Tambahan",
    "Dokumen Pendukung",
    "Referensi",
    "Cap Fasilitas",
    "ID TKU Penjual",
    "NPWP.NIK Pembeli",
    "Jenis ID Pembeli",
    "Negara Pembeli",
    "Nomor Dokumen Pembeli",
    "Nama Pembeli",
    "Alamat Pembeli",
    "Email Pembeli",
    "ID TKU Pembeli",
];

/// Column headers of the `DetailFaktur` sheet, row 1.
pub const DETAIL_HEADERS: [&str; 14] = [
    "Baris",
    "Barang.Jasa",
    "Kode Barang Jasa",
    "Nama Barang.Jasa",
    "Nama Satuan Ukur",
    "Harga Satuan",
    "Jumlah Barang Jasa",
    "Total Diskon",
    "DPP",
    "DPP Nilai Lain",
    "Tarif PPN",
    "PPN",
    "Tarif PPnBM",
    "PPnBM",
];

// =============================================================================
// Output Workbook
// =============================================================================

/// The in-memory Coretax output structure.
///
/// Owns the two data-row collections; the static header rows above them
/// are part of the template contract and are emitted by the writer. Rows
/// at the same index in `faktur` and `detail` describe the same invoice
/// line - positional alignment is the only linkage between the sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoretaxWorkbook {
    /// Data rows of the `Faktur` sheet, in input order.
    pub faktur: Vec<FakturRow>,
    /// Data rows of the `DetailFaktur` sheet, in input order.
    pub detail: Vec<DetailRow>,
}

impl CoretaxWorkbook {
    /// Create a fresh template with no data rows.
    ///
    /// Never fails: the template has no inputs and performs no I/O.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one invoice line to both sheets.
    pub fn push(&mut self, faktur: FakturRow, detail: DetailRow) {
        self.faktur.push(faktur);
        self.detail.push(detail);
    }

    /// Number of invoice lines (identical on both sheets).
    pub fn row_count(&self) -> usize {
        self.faktur.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DETAIL_WIDTH, FAKTUR_WIDTH};

    #[test]
    fn test_header_widths_match_row_widths() {
        assert_eq!(FAKTUR_HEADERS.len(), FAKTUR_WIDTH);
        assert_eq!(DETAIL_HEADERS.len(), DETAIL_WIDTH);
    }

    #[test]
    fn test_header_contract_samples() {
        assert_eq!(FAKTUR_HEADERS[0], "Baris");
        assert_eq!(FAKTUR_HEADERS[1], "Tanggal Faktur");
        assert_eq!(FAKTUR_HEADERS[16], "ID TKU Pembeli");
        assert_eq!(DETAIL_HEADERS[0], "Baris");
        assert_eq!(DETAIL_HEADERS[8], "DPP");
        assert_eq!(DETAIL_HEADERS[13], "PPnBM");
    }

    #[test]
    fn test_new_template_is_empty() {
        let wb = CoretaxWorkbook::new();
        assert_eq!(wb.row_count(), 0);
        assert!(wb.faktur.is_empty());
        assert!(wb.detail.is_empty());
    }

    #[test]
    fn test_data_rows_follow_headers() {
        assert_eq!(FAKTUR_DATA_FIRST_ROW, FAKTUR_HEADER_ROW + 1);
        assert_eq!(DETAIL_DATA_FIRST_ROW, DETAIL_HEADER_ROW + 1);
    }

    #[test]
    fn test_item_code_is_numeric_looking_text() {
        // The code must stay text even though it parses as a number.
        assert!(DEFAULT_ITEM_CODE.parse::<u32>().is_ok());
        assert!(SELLER_TAX_ID.starts_with("00"));
    }
}
