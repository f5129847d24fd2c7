use proptest::prelude::*;

use std::cmp::Ordering;

use bds_report::{aggregate, compare_labels};

fn label_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        prop::sample::select(vec!["Single", "Double", "Triple", "Non-Bled", "Mega Unit", "quad"])
            .prop_map(|label| Some(label.to_string())),
    ]
}

proptest! {
    #[test]
    fn total_equals_input_length(labels in prop::collection::vec(label_strategy(), 0..200)) {
        let expected = labels.len();
        let summary = aggregate("Bag Type", labels);
        prop_assert_eq!(summary.total, expected);
        prop_assert_eq!(summary.rows.iter().map(|row| row.count).sum::<usize>(), expected);
    }

    #[test]
    fn rows_are_sorted_and_distinct(labels in prop::collection::vec(label_strategy(), 0..200)) {
        let summary = aggregate("Bag Type", labels);
        for pair in summary.rows.windows(2) {
            prop_assert_eq!(compare_labels(&pair[0].label, &pair[1].label), Ordering::Less);
        }
    }

    #[test]
    fn order_of_input_does_not_matter(
        labels in prop::collection::vec(label_strategy(), 0..100),
        seed in any::<u64>(),
    ) {
        let mut shuffled = labels.clone();
        // Deterministic Fisher-Yates driven by the seed.
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = usize::try_from(state % (i as u64 + 1)).unwrap_or(0);
            shuffled.swap(i, j);
        }
        prop_assert_eq!(aggregate("Bag Type", labels), aggregate("Bag Type", shuffled));
    }

    #[test]
    fn missing_labels_land_in_unknown(missing in 0usize..50, single in 0usize..50) {
        let mut labels = vec![None; missing];
        labels.extend(std::iter::repeat_n(Some("Single".to_string()), single));
        let summary = aggregate("Bag Type", labels);
        let unknown = summary.count_for("Unknown");
        prop_assert_eq!(unknown, (missing > 0).then_some(missing));
        prop_assert_eq!(summary.count_for("Single"), (single > 0).then_some(single));
    }
}
