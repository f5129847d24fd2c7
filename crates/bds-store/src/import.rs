//! Import of CSV table exports into a row store.
//!
//! The first non-blank line is the header. Header and cell text is trimmed
//! and stripped of byte-order marks; empty cells become `null`. Short rows
//! are padded with `null`, extra trailing cells are ignored.

use std::path::Path;

use csv::ReaderBuilder;
use serde_json::Value;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::query::Row;
use crate::store::{RowStore, validate_table_name};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push('_');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> Value {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::String(trimmed.to_string())
    }
}

/// Read a CSV export into rows keyed by header.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Row>> {
    let csv_error = |error: csv::Error| StoreError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(columns) = headers.as_ref() else {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        };
        let mut row = Row::new();
        for (idx, column) in columns.iter().enumerate() {
            if column.is_empty() {
                continue;
            }
            let value = record.get(idx).map_or(Value::Null, normalize_cell);
            row.insert(column.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Append every row of a CSV export to `table`; returns the row count.
pub fn import_csv(store: &dyn RowStore, table: &str, path: &Path) -> Result<usize> {
    validate_table_name(table)?;
    let rows = read_csv_rows(path)?;
    let count = store.insert_many(table, rows)?;
    info!(table, source = %path.display(), rows = count, "imported csv");
    Ok(count)
}
