//! Summary reports over blood bank records.
//!
//! - **Labels**: code-to-label normalization and the blood-group key
//! - **Aggregation**: single-pass grouped counts with an `Unknown` bucket
//! - **Reports**: bag type, donor category, blood group, crossmatch result,
//!   positive tests
//! - **Board**: last-write-wins display of overlapping report requests
//! - **Export**: CSV and JSON output

pub mod aggregate;
pub mod board;
pub mod error;
pub mod export;
pub mod labels;
pub mod reports;

pub use aggregate::{aggregate, aggregate_by, compare_labels};
pub use board::{ReportBoard, Ticket};
pub use error::{ReportError, Result};
pub use export::{TOTAL_LABEL, summary_to_csv, to_json};
pub use labels::{blood_group_label, coded_label, display_label, label_table};
pub use reports::{
    PositiveRecord, PositiveTestReport, ReportKind, ReportOutput, bag_type_report,
    blood_group_report, crossmatch_report, donor_category_report, is_positive,
    positive_test_report, run_report,
};
