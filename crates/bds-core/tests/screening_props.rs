use proptest::prelude::*;
use rust_decimal::Decimal;

use bds_core::{classify, interpret};
use bds_model::{LabMeasurement, SCREENING_CUTOFF, ScreeningResult};

/// Readings in hundredths, as lab staff type them.
fn reading(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, 2)
}

proptest! {
    #[test]
    fn below_half_cutoff_is_non_reactive(hundredths in 0i64..50) {
        let value = reading(hundredths);
        prop_assert_eq!(interpret(&value.to_string()), Some(ScreeningResult::NonReactive));
    }

    #[test]
    fn between_half_and_cutoff_is_borderline(hundredths in 50i64..100) {
        let value = reading(hundredths);
        prop_assert_eq!(interpret(&value.to_string()), Some(ScreeningResult::BorderlineReactive));
    }

    #[test]
    fn at_or_above_cutoff_is_reactive(hundredths in 100i64..100_000) {
        let value = reading(hundredths);
        prop_assert_eq!(interpret(&value.to_string()), Some(ScreeningResult::Reactive));
    }

    #[test]
    fn classification_is_monotonic(a in 0i64..10_000, b in 0i64..10_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let rank = |result: ScreeningResult| match result {
            ScreeningResult::NonReactive => 0,
            ScreeningResult::BorderlineReactive => 1,
            ScreeningResult::Reactive => 2,
        };
        let low_result = classify(LabMeasurement::new(reading(low), SCREENING_CUTOFF));
        let high_result = classify(LabMeasurement::new(reading(high), SCREENING_CUTOFF));
        prop_assert!(rank(low_result) <= rank(high_result));
    }

    #[test]
    fn surrounding_whitespace_is_ignored(hundredths in 0i64..1_000) {
        let value = reading(hundredths).to_string();
        prop_assert_eq!(interpret(&format!("  {value}\t")), interpret(&value));
    }
}
