// src/report.rs
//! Tabular report output: `URL_ID`, `URL`, then the 13 metric columns.
//!
//! Format is chosen from the output extension: `.xlsx` (one worksheet, numeric
//! cells), `.csv`, `.json` (pretty array) or `.jsonl` (one object per line).
//! Anything else falls back to CSV.

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::engine::{AnalysisRecord, RECORD_COLUMNS};
use crate::ingest::ReportRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
    Json,
    JsonLines,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "xlsx" => ReportFormat::Xlsx,
            "json" => ReportFormat::Json,
            "jsonl" | "ndjson" => ReportFormat::JsonLines,
            _ => ReportFormat::Csv,
        }
    }
}

/// Full header row, identifier columns first.
pub fn header() -> Vec<&'static str> {
    let mut h = vec!["URL_ID", "URL"];
    h.extend_from_slice(&RECORD_COLUMNS);
    h
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(rename = "URL_ID")]
    url_id: &'a str,
    #[serde(rename = "URL")]
    url: &'a str,
    #[serde(flatten)]
    record: &'a AnalysisRecord,
}

impl<'a> From<&'a ReportRow> for JsonRow<'a> {
    fn from(row: &'a ReportRow) -> Self {
        Self {
            url_id: &row.article.url_id,
            url: &row.article.url,
            record: &row.record,
        }
    }
}

/// Write rows to `path` in the format implied by its extension.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_rows(BufWriter::new(file), rows, ReportFormat::from_path(path))
        .with_context(|| format!("writing report {}", path.display()))
}

pub fn write_rows<W: Write>(mut out: W, rows: &[ReportRow], format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Xlsx => {
            out.write_all(&workbook_bytes(rows)?)?;
            out.flush()?;
        }
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(header())?;
            for row in rows {
                let mut fields = vec![row.article.url_id.clone(), row.article.url.clone()];
                fields.extend(row.record.to_fields());
                writer.write_record(&fields)?;
            }
            writer.flush()?;
        }
        ReportFormat::Json => {
            let items: Vec<JsonRow<'_>> = rows.iter().map(JsonRow::from).collect();
            serde_json::to_writer_pretty(&mut out, &items)?;
            out.flush()?;
        }
        ReportFormat::JsonLines => {
            for row in rows {
                serde_json::to_writer(&mut out, &JsonRow::from(row))?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

fn workbook_bytes(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in (0u16..).zip(header()) {
        sheet.write_string(0, col, name)?;
    }
    for (r, row) in (1u32..).zip(rows) {
        sheet.write_string(r, 0, &row.article.url_id)?;
        sheet.write_string(r, 1, &row.article.url)?;
        for (col, value) in (2u16..).zip(row.record.to_numbers()) {
            sheet.write_number(r, col, value)?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}
