//! Grouping of fetched records into labelled counts.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use bds_model::{ReportBucket, ReportSummary};

use crate::labels::display_label;

/// Alphabetical row order: case-insensitive, ties broken by byte order.
pub fn compare_labels(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Count records per label in a single pass.
///
/// Missing labels count under `Unknown`, so the total always equals the
/// number of input records. Rows come back in [`compare_labels`] order, so
/// codes passed through in lower case sort among the named labels.
pub fn aggregate<I>(title: &str, labels: I) -> ReportSummary
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(display_label(label)).or_insert(0) += 1;
    }
    let mut rows: Vec<ReportBucket> = counts
        .into_iter()
        .map(|(label, count)| ReportBucket::new(label, count))
        .collect();
    rows.sort_by(|left, right| compare_labels(&left.label, &right.label));
    let summary = ReportSummary::from_rows(title, rows);
    debug!(
        report = title,
        buckets = summary.rows.len(),
        total = summary.total,
        "aggregated report"
    );
    summary
}

/// Group `records` by the label `key` extracts from each one.
pub fn aggregate_by<'a, T, F>(title: &str, records: &'a [T], key: F) -> ReportSummary
where
    F: Fn(&'a T) -> Option<String>,
{
    aggregate(title, records.iter().map(key))
}
