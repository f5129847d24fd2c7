//! Screening interpretation for infectious-marker assays.
//!
//! A reading is judged against its assay cutoff:
//!
//! | reading                          | result                |
//! |----------------------------------|-----------------------|
//! | `value >= cutoff`                | REACTIVE              |
//! | `cutoff / 2 <= value < cutoff`   | BORDERLINE REACTIVE   |
//! | `value < cutoff / 2`             | NON-REACTIVE          |
//!
//! With the shared cutoff of 1.00 the bands are `>= 1.0`, `[0.5, 1.0)` and
//! `< 0.5`. Both lower bounds are inclusive and the decimal is compared as
//! parsed, without rounding.

use rust_decimal::Decimal;
use serde::Serialize;

use bds_model::{Assay, BleedingRecord, LabMeasurement, ScreeningResult, parse_decimal};

/// Classify a measurement against its cutoff.
pub fn classify(measurement: LabMeasurement) -> ScreeningResult {
    let borderline_floor = measurement.cutoff / Decimal::TWO;
    if measurement.value >= measurement.cutoff {
        ScreeningResult::Reactive
    } else if measurement.value >= borderline_floor {
        ScreeningResult::BorderlineReactive
    } else {
        ScreeningResult::NonReactive
    }
}

/// Interpret a reading as typed by lab staff against the shared cutoff.
///
/// Input that is not a number yields `None`: the reading is not yet
/// interpretable, which is not an error.
pub fn interpret(value: &str) -> Option<ScreeningResult> {
    interpret_for_assay(Assay::HBsAg, value)
}

pub fn interpret_for_assay(assay: Assay, value: &str) -> Option<ScreeningResult> {
    parse_decimal(value).map(|parsed| classify(LabMeasurement::for_assay(assay, parsed)))
}

/// Interpreted results of every assay on one bleeding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordScreening {
    pub bag_no: Option<String>,
    pub donor_id: Option<String>,
    pub bleeding_date: chrono::NaiveDate,
    pub results: Vec<(Assay, Option<ScreeningResult>)>,
}

impl RecordScreening {
    pub fn result(&self, assay: Assay) -> Option<ScreeningResult> {
        self.results
            .iter()
            .find(|(candidate, _)| *candidate == assay)
            .and_then(|(_, result)| *result)
    }

    /// True when any assay interprets as REACTIVE.
    pub fn any_reactive(&self) -> bool {
        self.results
            .iter()
            .any(|(_, result)| result.is_some_and(ScreeningResult::is_reactive))
    }
}

/// Interpret every assay reading on a record.
pub fn screen_record(record: &BleedingRecord) -> RecordScreening {
    let results = Assay::ALL
        .iter()
        .map(|assay| (*assay, record.measurement(*assay).map(classify)))
        .collect();
    RecordScreening {
        bag_no: record.bag_no.clone(),
        donor_id: record.donor_id.clone(),
        bleeding_date: record.bleeding_date,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_values() {
        assert_eq!(interpret("0.01"), Some(ScreeningResult::NonReactive));
        assert_eq!(interpret("0.50"), Some(ScreeningResult::BorderlineReactive));
        assert_eq!(interpret("1.00"), Some(ScreeningResult::Reactive));
        assert_eq!(interpret("abc"), None);
    }

    #[test]
    fn test_boundaries_are_inclusive_from_below() {
        assert_eq!(interpret("0.4999"), Some(ScreeningResult::NonReactive));
        assert_eq!(interpret("0.5"), Some(ScreeningResult::BorderlineReactive));
        assert_eq!(interpret("0.9999"), Some(ScreeningResult::BorderlineReactive));
        assert_eq!(interpret("1"), Some(ScreeningResult::Reactive));
        assert_eq!(interpret("12.7"), Some(ScreeningResult::Reactive));
    }

    #[test]
    fn test_blank_and_garbage_are_not_interpretable() {
        for raw in ["", "   ", "-", "1.0.0", "NaN", "inf", "pending"] {
            assert_eq!(interpret(raw), None, "input {raw:?}");
        }
    }

    #[test]
    fn test_readings_beyond_decimal_range_still_classify() {
        assert_eq!(interpret("1e30"), Some(ScreeningResult::Reactive));
        assert_eq!(
            interpret("100000000000000000000000000000"),
            Some(ScreeningResult::Reactive)
        );
        assert_eq!(interpret("-1e30"), Some(ScreeningResult::NonReactive));
        assert_eq!(interpret("1e-40"), Some(ScreeningResult::NonReactive));
    }

    #[test]
    fn test_classify_uses_measurement_cutoff() {
        let measurement = LabMeasurement::new(dec!(1.5), dec!(2.00));
        assert_eq!(classify(measurement), ScreeningResult::BorderlineReactive);
    }

    #[test]
    fn test_screen_record_covers_all_assays() {
        let mut record = BleedingRecord::new(
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
        );
        record.hiv = Some(dec!(1.00));
        record.vdrl = Some(dec!(0.2));
        let screening = screen_record(&record);
        assert_eq!(screening.results.len(), 4);
        assert_eq!(screening.result(Assay::Hiv), Some(ScreeningResult::Reactive));
        assert_eq!(screening.result(Assay::Vdrl), Some(ScreeningResult::NonReactive));
        assert_eq!(screening.result(Assay::HBsAg), None);
        assert!(screening.any_reactive());
    }
}
