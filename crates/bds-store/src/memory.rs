//! In-process row store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::query::{Filter, Query, Row};
use crate::store::{RowStore, validate_table_name};

type Procedure = Box<dyn Fn(&Row) -> std::result::Result<Value, String> + Send + Sync>;

/// Row store held in memory, with optionally registered stored procedures.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<BTreeMap<String, Vec<Row>>>,
    procedures: BTreeMap<String, Procedure>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stored procedure under `name`.
    #[must_use]
    pub fn with_procedure<F>(mut self, name: impl Into<String>, procedure: F) -> Self
    where
        F: Fn(&Row) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.procedures.insert(name.into(), Box::new(procedure));
        self
    }

    /// Number of rows currently held in `table`.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        let tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.get(table).map_or(0, Vec::len))
    }
}

impl RowStore for MemoryStore {
    fn select(&self, query: &Query) -> Result<Vec<Row>> {
        validate_table_name(&query.table)?;
        let tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        let rows = tables.get(&query.table).cloned().unwrap_or_default();
        let selected = query.apply(rows);
        debug!(table = %query.table, rows = selected.len(), "memory select");
        Ok(selected)
    }

    fn insert(&self, table: &str, row: Row) -> Result<Row> {
        validate_table_name(table)?;
        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize> {
        validate_table_name(table)?;
        if filters.is_empty() {
            return Ok(0);
        }
        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !filters.iter().all(|filter| filter.matches(row)));
        Ok(before - rows.len())
    }

    fn call(&self, procedure: &str, args: &Row) -> Result<Value> {
        let Some(handler) = self.procedures.get(procedure) else {
            return Err(StoreError::UnsupportedProcedure(procedure.to_string()));
        };
        handler(args).map_err(|message| StoreError::Procedure {
            name: procedure.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn test_delete_requires_filters() {
        let store = MemoryStore::new();
        store.insert("t", row(json!({"a": 1}))).unwrap();
        assert_eq!(store.delete("t", &[]).unwrap(), 0);
        assert_eq!(store.delete("t", &[Filter::eq("a", 1)]).unwrap(), 1);
        assert_eq!(store.row_count("t").unwrap(), 0);
    }

    #[test]
    fn test_unregistered_procedure_fails() {
        let store = MemoryStore::new();
        let err = store.call("missing", &Row::new()).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedProcedure(name) if name == "missing"));
    }

    #[test]
    fn test_registered_procedure_receives_args() {
        let store = MemoryStore::new().with_procedure("echo", |args| {
            args.get("prefix")
                .cloned()
                .ok_or_else(|| "missing prefix".to_string())
        });
        let mut args = Row::new();
        args.insert("prefix".to_string(), json!("PAT"));
        assert_eq!(store.call("echo", &args).unwrap(), json!("PAT"));
        let err = store.call("echo", &Row::new()).unwrap_err();
        assert!(matches!(err, StoreError::Procedure { .. }));
    }
}
