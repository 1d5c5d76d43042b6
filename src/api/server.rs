//! HTTP server for the Coretax converter.
//!
//! Serves the upload form and converts uploaded invoice lists in a single
//! request/response round trip: the converted workbook streams back as a
//! file download, nothing is kept on the server afterwards.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/`               | Upload form                          |
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/convert`    | Upload an invoice list, download the Coretax workbook |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, Method, StatusCode},
    response::{sse::Event, Html, IntoResponse, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::LOG_BROADCASTER;
use super::types::{download_filename, error_response, XLSX_MIME};
use crate::transform::pipeline::{convert_bytes, ConvertOptions};
use crate::writer;

/// Upload size cap, matching what invoice exports realistically reach.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

const INDEX_HTML: &str = include_str!("index.html");

/// Start the HTTP server
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    // Permissive CORS for development.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/convert", post(convert_upload))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Coretax converter running on http://localhost:{}", port);
    println!("   GET  /            - Upload form");
    println!("   POST /api/convert - Convert an invoice list");
    println!("   GET  /api/logs    - SSE log stream");
    println!("   GET  /health      - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Upload form
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "coretax-convert",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "convert": "POST /api/convert",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Only `.xlsx` uploads are accepted, as in the regulator's own importer.
fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("xlsx"))
}

/// Upload-and-convert endpoint
async fn convert_upload(
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(error_response(&format!("Multipart error: {}", e))),
        )
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file_name = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(error_response(&format!("Read error: {}", e))),
                        )
                    })?
                    .to_vec(),
            );
        }
    }

    let bytes = file_data.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(error_response("Please upload your invoice list")),
        )
    })?;

    let upload_name = file_name.as_deref().unwrap_or("unknown");
    if !allowed_file(upload_name) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(error_response("Only .xlsx files are allowed")),
        ));
    }

    println!("\n📄 NEW UPLOAD: {} ({} bytes)", upload_name, bytes.len());

    let result = convert_bytes(&bytes, &ConvertOptions::default()).map_err(|e| {
        eprintln!("❌ Conversion error: {}", e);
        (StatusCode::BAD_REQUEST, Json(error_response(&e.to_string())))
    })?;

    let buffer = writer::write_to_buffer(&result.workbook).map_err(|e| {
        eprintln!("❌ Write error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_response(&e.to_string())),
        )
    })?;

    let filename = download_filename(chrono::Utc::now());
    println!("✅ Converted {} invoice lines -> {}", result.row_count, filename);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        buffer,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("invoices.xlsx"));
        assert!(allowed_file("INVOICES.XLSX"));
        assert!(!allowed_file("invoices.xls"));
        assert!(!allowed_file("invoices.csv"));
        assert!(!allowed_file("xlsx"));
    }
}
