//! Decoding of tabular imports into raw rows, plus the import template.
//!
//! This crate owns file-format concerns only; header resolution and value
//! coercion happen in `orgchart::normalize`.

use std::path::Path;

use orgchart::{CellValue, RawRow};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of row objects")]
    NotAnArray,
    #[error("row {index} is not a JSON object")]
    RowNotObject { index: usize },
    #[error("file has no header row")]
    MissingHeader,
}

pub type TabularResult<T> = Result<T, TabularError>;

/// Column headers of the import template, in order.
pub const TEMPLATE_HEADERS: [&str; 13] = [
    "ID",
    "Nome Completo",
    "Cargo",
    "ID do Superior",
    "Departamento",
    "Turno",
    "Data de Nascimento",
    "URL da Foto",
    "Descrição",
    "Status (Ativo)",
    "Início das Férias",
    "Dias de Férias",
    "Layout dos Subordinados",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Read comma-separated text, header row first.
pub fn read_csv(text: &str) -> TabularResult<Vec<RawRow>> {
    read_csv_with(text, b',')
}

pub fn read_csv_with(text: &str, delimiter: u8) -> TabularResult<Vec<RawRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TabularError::MissingHeader);
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let cell = match record.get(idx) {
                    Some(value) if !value.is_empty() => CellValue::from(value),
                    _ => CellValue::Empty,
                };
                (header, cell)
            })
            .collect();
        if row.is_blank() {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }
    debug!(rows = rows.len(), skipped, "decoded CSV rows");
    Ok(rows)
}

/// Read a JSON array of row objects, as spreadsheet converters emit them.
pub fn read_json_rows(text: &str) -> TabularResult<Vec<RawRow>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(TabularError::NotAnArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(header, cell)| (header, json_cell(cell)))
                .collect::<RawRow>()),
            _ => Err(TabularError::RowNotObject { index }),
        })
        .collect()
}

fn json_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(b),
        Value::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        Value::String(s) => CellValue::Text(s),
        other => CellValue::Text(other.to_string()),
    }
}

/// The import template: a CSV header row with every recognised column.
pub fn template_csv() -> TabularResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TEMPLATE_HEADERS)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| TabularError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
