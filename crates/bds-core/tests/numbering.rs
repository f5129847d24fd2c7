use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Value, json};

use bds_core::{AllocationError, DocumentNumberProvider, StoreNumberProvider};
use bds_model::DocumentKind;
use bds_store::{JsonStore, MemoryStore, tables};

#[test]
fn allocates_through_backend_procedure() {
    let sequence = AtomicU64::new(41);
    let store = MemoryStore::new().with_procedure(tables::GENERATE_DOCUMENT_NUMBER, move |args| {
        let prefix = args
            .get("prefix")
            .and_then(Value::as_str)
            .ok_or_else(|| "prefix required".to_string())?;
        let next = sequence.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!(format!("{prefix}-{next:06}")))
    });
    let provider = StoreNumberProvider::new(&store);

    let first = provider.allocate(DocumentKind::Patient).expect("allocate");
    let second = provider.allocate(DocumentKind::Invoice).expect("allocate");
    assert_eq!(first.as_str(), "PAT-000042");
    assert_eq!(second.as_str(), "INV-000043");
}

#[test]
fn missing_procedure_is_an_allocation_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonStore::open(dir.path()).expect("open store");
    let provider = StoreNumberProvider::new(&store);
    let err = provider.allocate(DocumentKind::Patient).unwrap_err();
    assert!(matches!(
        err,
        AllocationError::Unavailable { ref procedure } if procedure == "generate_document_number"
    ));
}

#[test]
fn exhausted_sequence_is_an_allocation_error() {
    let store = MemoryStore::new().with_procedure(tables::GENERATE_DOCUMENT_NUMBER, |_| {
        Err("sequence exhausted".to_string())
    });
    let provider = StoreNumberProvider::new(&store);
    let err = provider.allocate(DocumentKind::Invoice).unwrap_err();
    assert!(matches!(
        err,
        AllocationError::Backend {
            kind: DocumentKind::Invoice,
            ..
        }
    ));
}

#[test]
fn blank_or_non_string_reply_is_rejected() {
    for reply in [json!(""), json!(17), Value::Null] {
        let reply_clone = reply.clone();
        let store = MemoryStore::new()
            .with_procedure("next_number", move |_| Ok(reply_clone.clone()));
        let provider = StoreNumberProvider::new(&store).with_procedure("next_number");
        let err = provider.allocate(DocumentKind::Donor).unwrap_err();
        assert!(
            matches!(err, AllocationError::InvalidReply { .. }),
            "reply {reply}"
        );
    }
}
