//! The summary reports shown to lab staff.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, info_span};

use bds_core::{fetch_bleeding_records, fetch_crossmatch_records};
use bds_model::{
    Assay, BleedingRecord, CrossmatchRecord, DateRange, ReportBucket, ReportSummary,
};
use bds_store::RowStore;

use crate::aggregate::{aggregate_by, compare_labels};
use crate::error::{ReportError, Result};
use crate::labels::{blood_group_label, coded_label};

pub const BAG_TYPE_TITLE: &str = "Bag Type";
pub const DONOR_CATEGORY_TITLE: &str = "Donor Category";
pub const BLOOD_GROUP_TITLE: &str = "Blood Group";
pub const POSITIVE_TESTS_TITLE: &str = "Positive Tests";
pub const CROSSMATCH_TITLE: &str = "Crossmatch Result";

/// Which report to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    BagType,
    DonorCategory,
    BloodGroup,
    PositiveTests,
    Crossmatch,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::BagType,
        ReportKind::DonorCategory,
        ReportKind::BloodGroup,
        ReportKind::PositiveTests,
        ReportKind::Crossmatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::BagType => "bag-type",
            ReportKind::DonorCategory => "donor-category",
            ReportKind::BloodGroup => "blood-group",
            ReportKind::PositiveTests => "positive-tests",
            ReportKind::Crossmatch => "crossmatch",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::BagType => BAG_TYPE_TITLE,
            ReportKind::DonorCategory => DONOR_CATEGORY_TITLE,
            ReportKind::BloodGroup => BLOOD_GROUP_TITLE,
            ReportKind::PositiveTests => POSITIVE_TESTS_TITLE,
            ReportKind::Crossmatch => CROSSMATCH_TITLE,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ReportError::UnknownKind(s.to_string()))
    }
}

pub fn bag_type_report(records: &[BleedingRecord]) -> ReportSummary {
    aggregate_by(BAG_TYPE_TITLE, records, |record| {
        coded_label(record.bag_type.as_ref())
    })
}

pub fn donor_category_report(records: &[BleedingRecord]) -> ReportSummary {
    aggregate_by(DONOR_CATEGORY_TITLE, records, |record| {
        coded_label(record.donor_category.as_ref())
    })
}

pub fn blood_group_report(records: &[BleedingRecord]) -> ReportSummary {
    aggregate_by(BLOOD_GROUP_TITLE, records, |record| {
        blood_group_label(
            record.blood_group_separate.as_ref(),
            record.rh_factor.as_ref(),
        )
    })
}

pub fn crossmatch_report(records: &[CrossmatchRecord]) -> ReportSummary {
    aggregate_by(CROSSMATCH_TITLE, records, |record| {
        coded_label(record.result.as_ref())
    })
}

/// A bleeding record with at least one reading above its cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositiveRecord {
    pub bag_no: Option<String>,
    pub donor_id: Option<String>,
    pub bleeding_date: NaiveDate,
    pub assays: Vec<Assay>,
}

/// Per-assay positive counts plus the records behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositiveTestReport {
    #[serde(flatten)]
    pub summary: ReportSummary,
    pub records: Vec<PositiveRecord>,
}

/// True when a reading counts toward the positive-test report.
///
/// The comparison is strict: a reading equal to the cutoff is not counted
/// here even though the screening interpreter calls it REACTIVE.
pub fn is_positive(record: &BleedingRecord, assay: Assay) -> bool {
    record
        .measurement(assay)
        .is_some_and(|measurement| measurement.value > measurement.cutoff)
}

/// Count positive readings per assay.
///
/// Every assay gets a row, including those with no positives. The total is
/// the sum of the per-assay counts, so a record positive on two assays
/// contributes two.
pub fn positive_test_report(records: &[BleedingRecord]) -> PositiveTestReport {
    let mut counts = [0usize; Assay::ALL.len()];
    let mut positives = Vec::new();
    for record in records {
        let assays: Vec<Assay> = Assay::ALL
            .iter()
            .copied()
            .filter(|assay| is_positive(record, *assay))
            .collect();
        if assays.is_empty() {
            continue;
        }
        for assay in &assays {
            if let Some(index) = Assay::ALL.iter().position(|candidate| candidate == assay) {
                counts[index] += 1;
            }
        }
        positives.push(PositiveRecord {
            bag_no: record.bag_no.clone(),
            donor_id: record.donor_id.clone(),
            bleeding_date: record.bleeding_date,
            assays,
        });
    }
    let mut rows: Vec<ReportBucket> = Assay::ALL
        .iter()
        .zip(counts)
        .map(|(assay, count)| ReportBucket::new(assay.display_name(), count))
        .collect();
    rows.sort_by(|left, right| compare_labels(&left.label, &right.label));
    PositiveTestReport {
        summary: ReportSummary::from_rows(POSITIVE_TESTS_TITLE, rows),
        records: positives,
    }
}

/// Outcome of running a report against the row store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    Summary(ReportSummary),
    PositiveTests(PositiveTestReport),
}

impl ReportOutput {
    pub fn summary(&self) -> &ReportSummary {
        match self {
            ReportOutput::Summary(summary) => summary,
            ReportOutput::PositiveTests(report) => &report.summary,
        }
    }
}

/// Fetch the records for `range` and build the requested report.
///
/// A failed fetch fails the report; the aggregator never sees partial data.
pub fn run_report(
    store: &dyn RowStore,
    kind: ReportKind,
    range: DateRange,
) -> Result<ReportOutput> {
    let span = info_span!("report", kind = %kind, from = %range.start(), to = %range.end());
    let _guard = span.enter();
    let bleeding = || fetch_bleeding_records(store, range);
    let output = match kind {
        ReportKind::BagType => ReportOutput::Summary(bag_type_report(&bleeding()?)),
        ReportKind::DonorCategory => ReportOutput::Summary(donor_category_report(&bleeding()?)),
        ReportKind::BloodGroup => ReportOutput::Summary(blood_group_report(&bleeding()?)),
        ReportKind::PositiveTests => {
            ReportOutput::PositiveTests(positive_test_report(&bleeding()?))
        }
        ReportKind::Crossmatch => {
            let records = fetch_crossmatch_records(store, range)?;
            ReportOutput::Summary(crossmatch_report(&records))
        }
    };
    info!(total = output.summary().total, "report ready");
    Ok(output)
}
