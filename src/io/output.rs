use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use super::write_xlsx;
use crate::models::{OUTPUT_COLUMNS, OutputTable};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Download format for the finished template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Excel workbook with a single "Viber Blast" sheet
    #[default]
    Xlsx,
    /// Comma-separated text with a byte-order mark
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
        }
    }
}

/// Write the table as CSV: BOM, fixed header, then every record
pub fn write_csv<W: Write>(table: &OutputTable, mut writer: W) -> Result<W> {
    writer.write_all(UTF8_BOM).context("Failed to write byte-order mark")?;

    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    csv.write_record(OUTPUT_COLUMNS)
        .context("Failed to write CSV header")?;
    for record in table.records() {
        csv.serialize(record).context("Failed to write CSV row")?;
    }

    csv.into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV output: {}", e.error()))
}

/// Render the table into an in-memory file of the given format
pub fn render(table: &OutputTable, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Xlsx => Ok(write_xlsx(table, Cursor::new(Vec::new()))?.into_inner()),
        ExportFormat::Csv => write_csv(table, Vec::new()),
    }
}

/// Write `{dir}/{file_stem}.{ext}` and return its path
pub fn export(
    table: &OutputTable,
    format: ExportFormat,
    dir: &Path,
    file_stem: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let path = dir.join(format!("{}.{}", file_stem, format.extension()));
    let bytes = render(table, format)?;

    info!("Writing {} records to {:?}", table.len(), path);
    std::fs::write(&path, bytes).with_context(|| format!("Failed to create file: {:?}", path))?;

    Ok(path)
}
