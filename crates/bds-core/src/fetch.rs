//! Typed fetching of records for a reporting period.
//!
//! A fetch either returns every matching record or fails; a row that
//! cannot be decoded fails the whole fetch so reports never run on a
//! silently truncated set.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info_span};

use bds_model::{BleedingRecord, CrossmatchRecord, DateRange};
use bds_store::{Order, Query, Row, RowStore, tables};

use crate::error::{CoreError, Result};

/// Query for rows of `table` whose `date_column` falls within `range`.
pub fn date_range_query(table: &str, date_column: &str, range: DateRange) -> Query {
    Query::table(table)
        .between(
            date_column,
            range.start().to_string(),
            range.end().to_string(),
        )
        .order_by(Order::asc(date_column))
}

/// Decode every row, failing on the first one that does not fit `T`.
pub fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Row>) -> Result<Vec<T>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(Value::Object(row)).map_err(|error| CoreError::Decode {
                table: table.to_string(),
                index,
                message: error.to_string(),
            })
        })
        .collect()
}

pub fn fetch_bleeding_records(
    store: &dyn RowStore,
    range: DateRange,
) -> Result<Vec<BleedingRecord>> {
    fetch(store, tables::BLEEDING, "bleeding_date", range)
}

pub fn fetch_crossmatch_records(
    store: &dyn RowStore,
    range: DateRange,
) -> Result<Vec<CrossmatchRecord>> {
    fetch(store, tables::CROSSMATCH, "crossmatch_date", range)
}

fn fetch<T: DeserializeOwned>(
    store: &dyn RowStore,
    table: &str,
    date_column: &str,
    range: DateRange,
) -> Result<Vec<T>> {
    let span = info_span!("fetch", table, from = %range.start(), to = %range.end());
    let _guard = span.enter();
    let rows = store.select(&date_range_query(table, date_column, range))?;
    let records = decode_rows(table, rows)?;
    debug!(records = records.len(), "fetched records");
    Ok(records)
}
