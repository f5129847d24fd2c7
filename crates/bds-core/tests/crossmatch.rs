use chrono::NaiveDate;
use serde_json::{Value, json};

use bds_core::{CoreError, save_crossmatch};
use bds_model::{Coded, CrossmatchOutcome, CrossmatchRecord, ModelError, Reactivity};
use bds_store::{
    Filter, MemoryStore, Query, Row, RowStore, StoreError, tables,
};

fn row(value: Value) -> Row {
    value.as_object().cloned().expect("object")
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_many(
            tables::DONOR_PRODUCTS,
            vec![
                row(json!({"bag_no": "B-1", "component": "PRBC"})),
                row(json!({"bag_no": "B-2", "component": "FFP"})),
                row(json!({"bag_no": "B-3", "component": "PRBC"})),
            ],
        )
        .expect("seed products");
    store
        .insert_many(
            tables::PRE_CROSSMATCH_REQUESTS,
            vec![row(json!({"id": 7, "patient_id": "P-1"})), row(json!({"id": 8}))],
        )
        .expect("seed requests");
    store
}

fn record(bags: &[&str]) -> CrossmatchRecord {
    CrossmatchRecord {
        id: None,
        patient_id: "P-1".to_string(),
        request_id: Some("7".to_string()),
        bag_numbers: bags.iter().map(|bag| (*bag).to_string()).collect(),
        albumin: Some(Coded::Known(Reactivity::NonReactive)),
        saline: Some(Coded::Known(Reactivity::NonReactive)),
        coomb: Some(Coded::Known(Reactivity::NonReactive)),
        result: Some(Coded::Known(CrossmatchOutcome::Compatible)),
        crossmatch_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
    }
}

#[test]
fn save_removes_consumed_products_and_request() {
    let store = seeded_store();
    let saved = save_crossmatch(&store, &record(&["B-1", "B-3"])).expect("save");
    assert_eq!(saved.donor_products_removed, 2);
    assert_eq!(saved.requests_removed, 1);

    let products = store
        .select(&Query::table(tables::DONOR_PRODUCTS))
        .expect("select products");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].get("bag_no"), Some(&json!("B-2")));

    let requests = store
        .select(&Query::table(tables::PRE_CROSSMATCH_REQUESTS))
        .expect("select requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].get("id"), Some(&json!(8)));

    let stored = store
        .select(&Query::table(tables::CROSSMATCH).filter(Filter::eq("patient_id", "P-1")))
        .expect("select crossmatch");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get("result"), Some(&json!("compatible")));
}

#[test]
fn invalid_record_touches_nothing() {
    let store = seeded_store();
    let err = save_crossmatch(&store, &record(&[])).unwrap_err();
    assert!(matches!(err, CoreError::Model(ModelError::MissingBagNumbers)));
    assert_eq!(store.row_count(tables::DONOR_PRODUCTS).unwrap(), 3);
    assert_eq!(store.row_count(tables::PRE_CROSSMATCH_REQUESTS).unwrap(), 2);
    assert_eq!(store.row_count(tables::CROSSMATCH).unwrap(), 0);
}

/// Store whose inserts always fail, to check deletes never run first.
struct FailingInsertStore {
    inner: MemoryStore,
}

impl RowStore for FailingInsertStore {
    fn select(&self, query: &Query) -> bds_store::Result<Vec<Row>> {
        self.inner.select(query)
    }

    fn insert(&self, _table: &str, _row: Row) -> bds_store::Result<Row> {
        Err(StoreError::Poisoned)
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> bds_store::Result<usize> {
        self.inner.delete(table, filters)
    }

    fn call(&self, procedure: &str, args: &Row) -> bds_store::Result<Value> {
        self.inner.call(procedure, args)
    }
}

#[test]
fn failed_insert_deletes_nothing() {
    let store = FailingInsertStore {
        inner: seeded_store(),
    };
    let err = save_crossmatch(&store, &record(&["B-1"])).unwrap_err();
    assert!(matches!(err, CoreError::Store(StoreError::Poisoned)));
    assert_eq!(store.inner.row_count(tables::DONOR_PRODUCTS).unwrap(), 3);
    assert_eq!(
        store
            .inner
            .row_count(tables::PRE_CROSSMATCH_REQUESTS)
            .unwrap(),
        2
    );
}

#[test]
fn crossmatch_without_request_only_retires_products() {
    let store = seeded_store();
    let mut without_request = record(&["B-2"]);
    without_request.request_id = None;
    let saved = save_crossmatch(&store, &without_request).expect("save");
    assert_eq!(saved.donor_products_removed, 1);
    assert_eq!(saved.requests_removed, 0);
    assert_eq!(store.row_count(tables::PRE_CROSSMATCH_REQUESTS).unwrap(), 2);
}
