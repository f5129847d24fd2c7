//! Tests for bds-model record decoding.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use bds_model::{
    Assay, BagType, BleedingRecord, Coded, CrossmatchOutcome, CrossmatchRecord, DateRange,
    DocumentKind, DonorCategory, ModelError, RhFactor,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn bleeding_record_decodes_typed_row() {
    let row = json!({
        "id": 17,
        "donor_id": "D-001",
        "bag_no": "B-100",
        "bag_type": "double",
        "donor_category": "voluntary",
        "blood_group_separate": "AB",
        "rh_factor": "-ve",
        "bleeding_date": "2024-03-05",
        "hbsag": 0.12,
        "hcv": "1.00",
        "hiv": null,
        "vdrl": "0.5"
    });
    let record: BleedingRecord = serde_json::from_value(row).expect("decode record");
    assert_eq!(record.id.as_deref(), Some("17"));
    assert_eq!(record.bag_type, Some(Coded::Known(BagType::Double)));
    assert_eq!(
        record.donor_category,
        Some(Coded::Known(DonorCategory::Voluntary))
    );
    assert_eq!(record.rh_factor, Some(Coded::Known(RhFactor::Negative)));
    assert_eq!(record.bleeding_date, day(2024, 3, 5));
    assert_eq!(record.reading(Assay::HBsAg), Some(dec!(0.12)));
    assert_eq!(record.reading(Assay::Hcv), Some(dec!(1.00)));
    assert_eq!(record.reading(Assay::Hiv), None);
    assert_eq!(record.reading(Assay::Vdrl), Some(dec!(0.5)));
}

#[test]
fn bleeding_record_keeps_unreadable_values_as_missing() {
    let row = json!({
        "bleeding_date": "2024-03-05",
        "bag_type": "quadruple",
        "hiv": "pending"
    });
    let record: BleedingRecord = serde_json::from_value(row).expect("decode record");
    assert_eq!(record.bag_type, Some(Coded::Other("quadruple".to_string())));
    assert_eq!(record.hiv, None);
    assert_eq!(record.donor_category, None);
}

#[test]
fn bleeding_record_requires_date() {
    let row = json!({ "bag_type": "single" });
    assert!(serde_json::from_value::<BleedingRecord>(row).is_err());
}

#[test]
fn crossmatch_record_accepts_delimited_bag_numbers() {
    let row = json!({
        "patient_id": "P-9",
        "request_id": 44,
        "bag_numbers": "B-1; B-2,B-3",
        "albumin": "non_reactive",
        "result": "compatible",
        "crossmatch_date": "2024-04-01"
    });
    let record: CrossmatchRecord = serde_json::from_value(row).expect("decode crossmatch");
    assert_eq!(record.bag_numbers, vec!["B-1", "B-2", "B-3"]);
    assert_eq!(record.request_id.as_deref(), Some("44"));
    assert_eq!(
        record.result,
        Some(Coded::Known(CrossmatchOutcome::Compatible))
    );
    assert!(record.is_compatible());
    assert!(record.validate().is_ok());
}

#[test]
fn crossmatch_record_without_bags_is_invalid() {
    let row = json!({
        "patient_id": "P-9",
        "bag_numbers": [],
        "crossmatch_date": "2024-04-01"
    });
    let record: CrossmatchRecord = serde_json::from_value(row).expect("decode crossmatch");
    assert_eq!(record.validate(), Err(ModelError::MissingBagNumbers));
}

#[test]
fn coded_values_serialize_as_stored_codes() {
    let mut record = BleedingRecord::new(day(2024, 1, 2));
    record.bag_type = Some(Coded::Known(BagType::MegaUnit));
    record.donor_category = Some(Coded::Other("camp".to_string()));
    let value = serde_json::to_value(&record).expect("encode record");
    assert_eq!(value["bag_type"], "megaunit");
    assert_eq!(value["donor_category"], "camp");
}

#[test]
fn date_range_rejects_reversed_bounds() {
    assert!(DateRange::new(day(2024, 2, 1), day(2024, 1, 1)).is_err());
    let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 31)).expect("range");
    assert!(range.contains(day(2024, 1, 31)));
    assert!(!range.contains(day(2024, 2, 1)));
}

#[test]
fn document_kind_parses_prefix_and_name() {
    assert_eq!("pat".parse::<DocumentKind>().unwrap(), DocumentKind::Patient);
    assert_eq!("Invoice".parse::<DocumentKind>().unwrap(), DocumentKind::Invoice);
    assert!("receipt".parse::<DocumentKind>().is_err());
}
