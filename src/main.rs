//! Coretax CLI - Convert invoice lists to the Coretax import format
//!
//! # Main Commands
//!
//! ```bash
//! coretax serve                    # Start HTTP server (port 3000)
//! coretax convert invoices.xlsx   # Convert an invoice list
//! coretax template blank.xlsx     # Write an empty Coretax template
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! coretax inspect invoices.xlsx   # Show sheets and parsed row preview
//! ```

use clap::{Parser, Subcommand};
use coretax_convert::{
    convert_file, download_filename, read_sheet_from_path, save_to_path, sheet_names,
    ConvertOptions, CoretaxWorkbook,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "coretax")]
#[command(about = "Convert invoice list spreadsheets to the Coretax import format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an invoice list to a Coretax workbook
    Convert {
        /// Input invoice list (.xlsx)
        input: PathBuf,

        /// Output file (default: Coretax_Import_<timestamp>.xlsx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read this worksheet instead of the first one
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Write an empty Coretax template (headers only, no data rows)
    Template {
        /// Output file
        output: PathBuf,
    },

    /// Show worksheets and a preview of the parsed rows
    Inspect {
        /// Input file (.xlsx)
        input: PathBuf,

        /// Read this worksheet instead of the first one
        #[arg(short, long)]
        sheet: Option<String>,

        /// Number of data rows to preview
        #[arg(long, default_value = "5")]
        preview_rows: usize,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output, sheet } => cmd_convert(&input, output, sheet),

        Commands::Template { output } => cmd_template(&output),

        Commands::Inspect { input, sheet, preview_rows } => {
            cmd_inspect(&input, sheet, preview_rows)
        }

        Commands::Serve { port } => cmd_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<PathBuf>,
    sheet: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Converting: {}", input.display());

    let output = output.unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(download_filename(chrono::Utc::now()))
    });

    let options = ConvertOptions { sheet };
    let report = convert_file(input, &output, &options)?;

    eprintln!("   Worksheet: {}", report.sheet_name);
    eprintln!("   Invoice lines: {}", report.row_count);
    eprintln!("💾 Output written to: {}", output.display());
    eprintln!("✨ Done!");
    Ok(())
}

fn cmd_template(output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    save_to_path(&CoretaxWorkbook::new(), output)?;
    eprintln!("💾 Empty Coretax template written to: {}", output.display());
    Ok(())
}

fn cmd_inspect(
    input: &Path,
    sheet: Option<String>,
    preview_rows: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Inspecting: {}", input.display());

    let names = sheet_names(input)?;
    eprintln!("   Worksheets: {}", names.join(", "));

    let data = read_sheet_from_path(input, sheet.as_deref())?;
    eprintln!("   Reading '{}': {} data rows", data.name, data.data_row_count());

    for row in 2..=data.max_row().min(1 + preview_rows) {
        let cells: Vec<String> = (1..=30)
            .map(|col| format!("{:?}", data.cell(row, col)))
            .collect();
        println!("[{:3}] {}", row - 1, cells.join(" | "));
    }

    Ok(())
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    coretax_convert::server::start_server(port).await
}
