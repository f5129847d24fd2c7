//! File-backed row store.
//!
//! # Storage Format
//!
//! Each table lives in `{data_dir}/{table}.json` as a JSON array of objects.
//! A table whose file does not exist yet is empty. Writes replace the file
//! through a temporary sibling and a rename so readers never observe a
//! half-written table.
//!
//! The store has no stored procedures; identifier allocation against it
//! fails with [`StoreError::UnsupportedProcedure`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::query::{Filter, Query, Row};
use crate::store::{RowStore, validate_table_name};

/// Row store persisting one JSON file per table.
#[derive(Debug)]
pub struct JsonStore {
    /// Directory holding the table files.
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| StoreError::io(&base_dir, source))?;
        info!(data_dir = %base_dir.display(), "opened row store");
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file backing `table`.
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        validate_table_name(table)?;
        Ok(self.base_dir.join(format!("{table}.json")))
    }

    /// Every table that currently has a backing file.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(&self.base_dir).map_err(|source| StoreError::io(&self.base_dir, source))?;
        let mut tables = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::io(&self.base_dir, source))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(table) = name.strip_suffix(".json")
                && validate_table_name(table).is_ok()
            {
                tables.push(table.to_string());
            }
        }
        tables.sort();
        Ok(tables)
    }

    fn read_table(&self, table: &str) -> Result<Vec<Row>> {
        let path = self.table_path(table)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(StoreError::io(&path, error)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let Value::Array(items) = value else {
            return Err(StoreError::Corrupt { path });
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                _ => Err(StoreError::Corrupt { path: path.clone() }),
            })
            .collect()
    }

    fn write_table(&self, table: &str, rows: Vec<Row>) -> Result<()> {
        let path = self.table_path(table)?;
        let tmp = path.with_extension("json.tmp");
        let items: Vec<Value> = rows.into_iter().map(Value::Object).collect();
        let json = serde_json::to_string_pretty(&items).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&tmp, json).map_err(|source| StoreError::io(&tmp, source))?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::io(&path, source))?;
        Ok(())
    }
}

impl RowStore for JsonStore {
    fn select(&self, query: &Query) -> Result<Vec<Row>> {
        let rows = self.read_table(&query.table)?;
        let total = rows.len();
        let selected = query.apply(rows);
        debug!(
            table = %query.table,
            scanned = total,
            selected = selected.len(),
            "select"
        );
        Ok(selected)
    }

    fn insert(&self, table: &str, row: Row) -> Result<Row> {
        self.insert_many(table, vec![row.clone()])?;
        Ok(row)
    }

    fn insert_many(&self, table: &str, new_rows: Vec<Row>) -> Result<usize> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut rows = self.read_table(table)?;
        let written = new_rows.len();
        rows.extend(new_rows);
        self.write_table(table, rows)?;
        debug!(table, written, "insert");
        Ok(written)
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize> {
        if filters.is_empty() {
            validate_table_name(table)?;
            return Ok(0);
        }
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut rows = self.read_table(table)?;
        let before = rows.len();
        rows.retain(|row| !filters.iter().all(|filter| filter.matches(row)));
        let removed = before - rows.len();
        if removed > 0 {
            self.write_table(table, rows)?;
        }
        debug!(table, removed, "delete");
        Ok(removed)
    }

    fn call(&self, procedure: &str, _args: &Row) -> Result<Value> {
        Err(StoreError::UnsupportedProcedure(procedure.to_string()))
    }
}
