//! Row store seam for blood bank data.
//!
//! Everything above this crate sees the backend as "a row store reachable
//! by table name, filter, and order" plus named stored procedures.

pub mod error;
pub mod import;
pub mod json_store;
pub mod memory;
pub mod query;
pub mod store;
pub mod tables;

pub use error::{Result, StoreError};
pub use import::{import_csv, read_csv_rows};
pub use json_store::JsonStore;
pub use memory::MemoryStore;
pub use query::{Direction, Filter, Order, Query, Row, compare_values};
pub use store::{RowStore, validate_table_name};
