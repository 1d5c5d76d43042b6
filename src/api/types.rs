//! HTTP API types and response helpers.

use serde_json::{json, Value};
use uuid::Uuid;

/// MIME type of the generated workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download name for a converted workbook: `Coretax_Import_<UTC time>.xlsx`.
///
/// The timestamp keeps repeated conversions from clobbering each other in
/// the user's download folder; the workbook content itself carries none.
pub fn download_filename(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("Coretax_Import_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Create a JSON error envelope for a failed conversion.
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}
