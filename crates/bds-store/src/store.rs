use serde_json::Value;

use crate::error::Result;
use crate::query::{Filter, Query, Row};

/// A store of rows reachable by table name, filter and order.
///
/// Implementations return either the complete result of a query or an
/// error; a partially read table is never returned as a success.
pub trait RowStore: Send + Sync {
    /// Rows of `query.table` matching every filter, in the requested order.
    fn select(&self, query: &Query) -> Result<Vec<Row>>;

    /// Append a row and return it as stored.
    fn insert(&self, table: &str, row: Row) -> Result<Row>;

    /// Append several rows; returns how many were written.
    fn insert_many(&self, table: &str, rows: Vec<Row>) -> Result<usize> {
        let mut written = 0;
        for row in rows {
            self.insert(table, row)?;
            written += 1;
        }
        Ok(written)
    }

    /// Delete rows matching every filter; returns how many were removed.
    /// An empty filter list deletes nothing.
    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize>;

    /// Invoke a stored procedure on the backend.
    fn call(&self, procedure: &str, args: &Row) -> Result<Value>;
}

/// Reject table names that could escape the store's namespace.
pub fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(crate::StoreError::InvalidTable(table.to_string()))
    }
}
